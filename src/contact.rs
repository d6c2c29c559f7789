//! Outbound WhatsApp links.
//!
//! Every booking button on the page opens a chat with a prefilled message:
//! `https://wa.me/<number>?text=<message>`. The message is percent-encoded by
//! [`url::Url`]; the number must be digits only.

use crate::config::ContactConfig;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("WhatsApp number must be digits only, got {0:?}")]
    InvalidNumber(String),
    #[error("invalid WhatsApp base URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Chat link for one WhatsApp number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppLink {
    chat: Url,
}

impl WhatsAppLink {
    pub fn new(base: &str, number: &str) -> Result<Self, ContactError> {
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContactError::InvalidNumber(number.to_string()));
        }
        let mut chat = Url::parse(base)?;
        chat.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(number);
        Ok(Self { chat })
    }

    pub fn from_config(contact: &ContactConfig) -> Result<Self, ContactError> {
        Self::new(&contact.whatsapp_base, &contact.whatsapp_number)
    }

    /// Link without a prefilled message.
    pub fn bare(&self) -> String {
        self.chat.to_string()
    }

    /// Link that opens the chat with `text` prefilled.
    pub fn with_message(&self, text: &str) -> String {
        let mut url = self.chat.clone();
        url.query_pairs_mut().append_pair("text", text);
        url.to_string()
    }
}

/// Message for a single service card: `"<prefix> <service>"`.
pub fn service_message(prefix: &str, service: &str) -> String {
    format!("{} {}", prefix.trim_end(), service.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn link() -> WhatsAppLink {
        WhatsAppLink::new("https://wa.me", "6287884808447").unwrap()
    }

    #[test]
    fn bare_link() {
        assert_eq!(link().bare(), "https://wa.me/6287884808447");
    }

    #[test]
    fn base_with_trailing_slash() {
        let link = WhatsAppLink::new("https://wa.me/", "628123").unwrap();
        assert_eq!(link.bare(), "https://wa.me/628123");
    }

    #[test]
    fn base_with_path_keeps_it() {
        let link = WhatsAppLink::new("https://api.example.com/send", "628123").unwrap();
        assert_eq!(link.bare(), "https://api.example.com/send/628123");
    }

    #[test]
    fn message_is_encoded() {
        let url = link().with_message("Halo, saya ingin booking layanan waxing");
        assert!(url.starts_with("https://wa.me/6287884808447?text="));
        assert!(!url.contains(' '));
        let parsed = Url::parse(&url).unwrap();
        let (key, value) = parsed.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(value, "Halo, saya ingin booking layanan waxing");
    }

    #[test]
    fn message_with_reserved_characters() {
        let url = link().with_message("a&b=c?#!");
        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.query_pairs().count(), 1);
        assert_eq!(parsed.query_pairs().next().unwrap().1, "a&b=c?#!");
        assert!(parsed.fragment().is_none());
    }

    #[test]
    fn rejects_non_digit_numbers() {
        for bad in ["", "+6287", "0812 345", "62-812"] {
            assert!(matches!(
                WhatsAppLink::new("https://wa.me", bad),
                Err(ContactError::InvalidNumber(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_base() {
        assert!(matches!(
            WhatsAppLink::new("not a url", "628"),
            Err(ContactError::Url(_))
        ));
    }

    #[test]
    fn service_message_joins_with_space() {
        assert_eq!(
            service_message("Halo, saya tertarik dengan layanan", "Waxing Kaki"),
            "Halo, saya tertarik dengan layanan Waxing Kaki"
        );
        assert_eq!(service_message("Hi ", " Body "), "Hi Body");
    }

    #[test]
    fn from_stock_config() {
        let config = SiteConfig::default();
        let link = WhatsAppLink::from_config(&config.contact).unwrap();
        assert_eq!(link.bare(), "https://wa.me/6287884808447");
    }
}
