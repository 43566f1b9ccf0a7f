// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

use contact_form_guard::{bot::HoneypotFields, guard::ContactForm};

/// A well-formed submission; `i` varies the message so dedup never trips.
pub fn legitimate_form(i: usize) -> ContactForm {
    ContactForm {
        from_name: "สมหญิง รักดี".to_string(),
        phone: "081-234-5678".to_string(),
        service: "ตัดแต่งกิ่งไม้".to_string(),
        message: format!("อยากทราบราคาตัดแต่งกิ่งไม้ บ้านเลขที่ {}", i + 1),
        honeypots: HoneypotFields::default(),
    }
}

/// Messages a spam bot typically posts. All must be rejected.
pub fn spam_messages() -> Vec<&'static str> {
    vec![
        "Cheap VIAGRA and cialis delivered overnight",
        "Congratulations! You are our lucky winner today",
        "Claim your prize: visit https://totally-legit.example",
        "Best online casino, sign up and get bonus",
        "Click here for FREE MONEY no strings attached",
        "Check http://x.com it is great stuff",
        "lottery results inside, open now please",
        "!!!!!!!!!!!!!!!!!!!!",
        "..........",
        "hi",
        "aaaaaaaaaaaaaaaaaaaa buy now",
    ]
}

/// Names a bot tends to fill in. All must be rejected.
pub fn bot_names() -> Vec<&'static str> {
    vec![
        "test",
        "Admin",
        "xxx",
        "SpamBot",
        "<script>alert(1)</script>",
        "John123",
        "Hacker Man",
        "Joooooohn",
        "user@example.com",
        "",
    ]
}

/// Phone numbers that must be rejected.
pub fn bad_phones() -> Vec<&'static str> {
    vec![
        "0212345678",
        "0888888888",
        "1234567890",
        "081234567",
        "08123456789",
        "+66812345678",
        "phone",
        "",
    ]
}

/// Honeypot combinations, each with at least one field filled.
pub fn filled_honeypots() -> Vec<HoneypotFields> {
    vec![
        HoneypotFields {
            website: "https://seo.example".to_string(),
            ..Default::default()
        },
        HoneypotFields {
            business_email: "sales@seo.example".to_string(),
            ..Default::default()
        },
        HoneypotFields {
            company_name: "SEO Kings".to_string(),
            ..Default::default()
        },
        HoneypotFields {
            website: "x".to_string(),
            business_email: "y".to_string(),
            company_name: "z".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legitimate_forms_differ() {
        assert_ne!(legitimate_form(0).message, legitimate_form(1).message);
    }

    #[test]
    fn test_honeypots_all_filled() {
        assert!(filled_honeypots().iter().all(|h| h.tripped().is_some()));
    }
}
