//! Removal of personal and sensitive data from outgoing records.

use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::event::{Event, EventParticipant};
use s2s_entity::sample::Sample;
use s2s_entity::share::ShareOptions;

/// A record that can be stripped before it leaves the instance.
pub trait Pseudonymize {
    /// Replace personal data with placeholders.
    fn pseudonymize_personal(&mut self) {}

    /// Remove sensitive free-text details.
    fn pseudonymize_sensitive(&mut self) {}

    /// Apply whatever the share options request. Sensitive pseudonymization
    /// implies personal pseudonymization.
    fn pseudonymize_for(&mut self, options: &ShareOptions) {
        if options.pseudonymize_personal_data || options.pseudonymize_sensitive_data {
            self.pseudonymize_personal();
        }
        if options.pseudonymize_sensitive_data {
            self.pseudonymize_sensitive();
        }
    }
}

impl Pseudonymize for Case {
    fn pseudonymize_personal(&mut self) {
        self.person.pseudonymize();
    }

    fn pseudonymize_sensitive(&mut self) {
        self.additional_details = None;
    }
}

impl Pseudonymize for Contact {
    fn pseudonymize_personal(&mut self) {
        self.person.pseudonymize();
    }

    fn pseudonymize_sensitive(&mut self) {
        self.description = None;
    }
}

impl Pseudonymize for Sample {
    fn pseudonymize_sensitive(&mut self) {
        self.comment = None;
    }
}

impl Pseudonymize for Event {
    fn pseudonymize_sensitive(&mut self) {
        self.description = None;
    }
}

impl Pseudonymize for EventParticipant {
    fn pseudonymize_personal(&mut self) {
        self.person.pseudonymize();
    }

    fn pseudonymize_sensitive(&mut self) {
        self.involvement_description = None;
    }
}
