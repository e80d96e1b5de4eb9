//! Intent routing and canned reply generation
//!
//! A pure, stateless mapping from inbound text to guidance text: lowercase
//! and trim, then test ordered keyword categories, first match wins.
//! Matching is case-insensitive substring matching, not whole-word - a text
//! containing "helper" lands in the emergency category because it contains
//! "help". Emergency keywords are tested before every other category so an
//! urgent message never gets a greeting back.

/// Keywords per category; substring matched against the normalized text.
const EMERGENCY_KEYWORDS: &[&str] = &["emergency", "urgent", "critical", "help"];
const GREETING_KEYWORDS: &[&str] = &["hi", "hello", "hey", "namaste"];
const SYMPTOM_KEYWORDS: &[&str] = &["symptom", "pain", "fever", "cough", "headache"];
const MEDICINE_KEYWORDS: &[&str] = &["medicine", "medication", "drug", "tablet"];
const FACILITY_KEYWORDS: &[&str] = &["hospital", "clinic", "doctor", "nearby"];

/// Recognized message intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Emergency,
    Greeting,
    Symptom,
    Medicine,
    Facility,
    Fallback,
}

/// Classify a message text into an intent category.
///
/// Total: every input maps to a category, `Fallback` when nothing matches.
#[must_use]
pub fn classify(text: &str) -> Intent {
    let normalized = text.to_lowercase();
    let normalized = normalized.trim();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| normalized.contains(k));

    if contains_any(EMERGENCY_KEYWORDS) {
        Intent::Emergency
    } else if contains_any(GREETING_KEYWORDS) {
        Intent::Greeting
    } else if contains_any(SYMPTOM_KEYWORDS) {
        Intent::Symptom
    } else if contains_any(MEDICINE_KEYWORDS) {
        Intent::Medicine
    } else if contains_any(FACILITY_KEYWORDS) {
        Intent::Facility
    } else {
        Intent::Fallback
    }
}

/// Canned reply generator.
///
/// Carries the configured emergency contact number so emergency guidance can
/// interpolate it. Performs no I/O and always returns non-empty text.
#[derive(Debug, Clone)]
pub struct ReplyCatalog {
    emergency_number: String,
}

impl ReplyCatalog {
    /// Create a catalog with the configured emergency contact number
    #[must_use]
    pub fn new(emergency_number: impl Into<String>) -> Self {
        Self {
            emergency_number: emergency_number.into(),
        }
    }

    /// Generate the reply for an inbound message text
    #[must_use]
    pub fn reply_for(&self, text: &str) -> String {
        match classify(text) {
            Intent::Emergency => self.emergency_reply(),
            Intent::Greeting => Self::greeting_reply(),
            Intent::Symptom => Self::symptom_reply(),
            Intent::Medicine => Self::medicine_reply(),
            Intent::Facility => Self::facility_reply(),
            Intent::Fallback => Self::fallback_reply(),
        }
    }

    fn greeting_reply() -> String {
        "👋 Hello! Welcome to Healthcare Assistant.\n\n\
         I can help you with:\n\
         • Symptom checking\n\
         • Health information\n\
         • Emergency guidance\n\
         • Find hospitals\n\
         • Medicine information\n\n\
         How can I assist you today?"
            .to_string()
    }

    fn emergency_reply(&self) -> String {
        format!(
            "🚨 EMERGENCY ASSISTANCE\n\n\
             If this is a medical emergency:\n\
             📞 Call {} immediately\n\n\
             For urgent care:\n\
             • Stay calm\n\
             • Note symptoms\n\
             • Contact nearest hospital\n\n\
             Reply with your symptoms for immediate guidance.",
            self.emergency_number
        )
    }

    fn symptom_reply() -> String {
        "🏥 SYMPTOM CHECKER\n\n\
         Please describe your symptoms in detail:\n\
         • When did they start?\n\
         • How severe are they? (1-10)\n\
         • Any other symptoms?\n\n\
         I'll provide guidance based on your symptoms.\n\n\
         ⚠️ This is not a diagnosis. Seek medical care if symptoms worsen."
            .to_string()
    }

    fn medicine_reply() -> String {
        "💊 MEDICINE INFORMATION\n\n\
         Please provide:\n\
         • Medicine name\n\
         • Your question about it\n\n\
         I'll provide information on:\n\
         • Usage instructions\n\
         • Common side effects\n\
         • Precautions\n\n\
         ⚠️ Always consult your doctor before taking any medication."
            .to_string()
    }

    fn facility_reply() -> String {
        "🏥 FIND HEALTHCARE FACILITIES\n\n\
         To find nearby hospitals/clinics:\n\
         • Share your location\n\
         • Or tell me your area/city\n\n\
         I'll help you find:\n\
         • Nearest hospitals\n\
         • Specialist clinics\n\
         • Emergency centers"
            .to_string()
    }

    fn fallback_reply() -> String {
        "I'm here to help! You can ask me about:\n\n\
         🏥 Health symptoms\n\
         💊 Medicine information\n\
         🚨 Emergency guidance\n\
         🏥 Find hospitals\n\
         💡 Health tips\n\n\
         What would you like to know?"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ReplyCatalog {
        ReplyCatalog::new("112")
    }

    #[test]
    fn greeting_text_gets_welcome_reply() {
        let reply = catalog().reply_for("Hello there");
        assert!(reply.contains("Welcome to Healthcare Assistant"));
    }

    #[test]
    fn emergency_takes_precedence_over_greeting() {
        assert_eq!(classify("hello, I need urgent help"), Intent::Emergency);
        let reply = catalog().reply_for("hello, I need urgent help");
        assert!(reply.contains("EMERGENCY ASSISTANCE"));
    }

    #[test]
    fn emergency_reply_interpolates_configured_number() {
        let reply = ReplyCatalog::new("999").reply_for("this is an emergency");
        assert!(reply.contains("Call 999 immediately"));
    }

    #[test]
    fn substring_overmatch_is_preserved() {
        // "helper" contains "help" - known over-match, kept on purpose
        assert_eq!(classify("looking for a helper"), Intent::Emergency);
    }

    #[test]
    fn symptom_keywords_route_to_symptom_checker() {
        assert_eq!(classify("I have a fever and headache"), Intent::Symptom);
        assert!(catalog().reply_for("fever").contains("SYMPTOM CHECKER"));
    }

    #[test]
    fn medicine_keywords_route_to_medicine_info() {
        assert_eq!(classify("what tablet should I take"), Intent::Medicine);
    }

    #[test]
    fn facility_keywords_route_to_finder() {
        assert_eq!(classify("nearest hospital please"), Intent::Facility);
    }

    #[test]
    fn unmatched_text_falls_back_to_menu() {
        assert_eq!(classify("what is the weather"), Intent::Fallback);
        assert!(catalog().reply_for("xyzzy").contains("I'm here to help"));
    }

    #[test]
    fn classification_is_case_insensitive_and_trimmed() {
        assert_eq!(classify("  HELLO  "), Intent::Greeting);
        assert_eq!(classify("EMERGENCY"), Intent::Emergency);
    }

    #[test]
    fn reply_is_always_non_empty() {
        for text in ["", "   ", "hello", "help", "random words"] {
            assert!(!catalog().reply_for(text).is_empty());
        }
    }
}
