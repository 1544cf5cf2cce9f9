//! Escalation event: who failed, who gets alerted, and what is said.

use crate::domain::contact::ContactName;

/// Ephemeral record built at the moment of escalation, used only to compose
/// the alert spoken to the emergency contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationEvent {
    /// Contact whose check-in failed, when the directory knows them.
    pub failed_name: Option<ContactName>,
    /// Number that failed verification, when the callback reported one.
    pub failed_number: Option<String>,
    /// Where the alert call goes.
    pub emergency_number: String,
}

impl EscalationEvent {
    /// Composes the alert message.
    ///
    /// Priority: named contact > raw failed number > generic. Exactly one of
    /// the three forms is ever used.
    pub fn alert_message(&self) -> String {
        if let Some(name) = &self.failed_name {
            format!(
                "Alerta de verificação de segurança. {name} não respondeu à verificação. \
                 Por favor, entre em contato."
            )
        } else if let Some(number) = &self.failed_number {
            format!("O número {number} não respondeu à verificação. Por favor, entre em contato.")
        } else {
            "Alguém não respondeu à verificação de segurança.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_contact_takes_priority() {
        let event = EscalationEvent {
            failed_name: Some(ContactName::new("gustavo").unwrap()),
            failed_number: Some("+5511999999999".to_string()),
            emergency_number: "+5511888888888".to_string(),
        };
        let message = event.alert_message();
        assert!(message.contains("gustavo"));
        assert!(!message.contains("+5511999999999"));
    }

    #[test]
    fn raw_number_used_when_name_unknown() {
        let event = EscalationEvent {
            failed_name: None,
            failed_number: Some("+5511999999999".to_string()),
            emergency_number: "+5511888888888".to_string(),
        };
        let message = event.alert_message();
        assert!(message.contains("+5511999999999"));
    }

    #[test]
    fn generic_message_when_nothing_is_known() {
        let event = EscalationEvent {
            failed_name: None,
            failed_number: None,
            emergency_number: "+5511888888888".to_string(),
        };
        assert_eq!(
            event.alert_message(),
            "Alguém não respondeu à verificação de segurança."
        );
    }
}
