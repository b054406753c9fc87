//! Business-rule validation for every resource type.
//!
//! Each checker returns an ordered list of stable violation codes; an empty
//! list means the candidate is acceptable. Codes are appended in a fixed
//! field order so responses are deterministic. Every mutating endpoint runs
//! the same checker for a resource, for create and for merged partial
//! updates alike.

use validator::ValidationError;

use crate::models::{CommentFields, ProductPostFields};

/// Closed set of product categories; membership is case-sensitive
pub const PRODUCT_CATEGORIES: [&str; 5] = ["Furniture", "Clothes", "Technology", "Books", "Other"];

pub const TITLE_MIN: usize = 3;
pub const TITLE_MAX: usize = 50;
pub const POST_CONTENT_MIN: usize = 10;
pub const POST_CONTENT_MAX: usize = 1000;
pub const COMMENT_TITLE_MIN: usize = 3;
pub const COMMENT_CONTENT_MIN: usize = 2;
pub const COMMENT_CONTENT_MAX: usize = 1000;
pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 80;

/// Account rules that come from configuration
#[derive(Debug, Clone)]
pub struct AccountRules {
    pub allowed_email_domain: String,
    pub min_password_length: usize,
}

/// Account candidate: the password is present on registration and on a
/// partial update that changes it, absent otherwise.
#[derive(Debug)]
pub struct AccountCandidate<'a> {
    pub email: &'a str,
    pub password: Option<&'a str>,
    pub username: &'a str,
}

/// Validate an account candidate. Field order: email, password, username.
pub fn validate_account(candidate: &AccountCandidate<'_>, rules: &AccountRules) -> Vec<String> {
    let mut violations = Vec::new();

    push(&mut violations, check_email_domain(candidate.email, &rules.allowed_email_domain));
    if let Some(password) = candidate.password {
        push(&mut violations, check_min_length(password, rules.min_password_length, "passwordLength"));
    }
    push(&mut violations, check_length(candidate.username, USERNAME_MIN, USERNAME_MAX, "usernameLength"));

    violations
}

/// Validate a product post candidate. Field order: title, price, category,
/// content.
pub fn validate_product_post(candidate: &ProductPostFields) -> Vec<String> {
    let mut violations = Vec::new();

    push(&mut violations, check_length(&candidate.title, TITLE_MIN, TITLE_MAX, "titleLength"));
    push(&mut violations, check_price(candidate.price));
    push(&mut violations, check_category(&candidate.category));
    push(&mut violations, check_length(&candidate.content, POST_CONTENT_MIN, POST_CONTENT_MAX, "contentLength"));

    violations
}

/// Validate a comment candidate. Field order: title, content.
pub fn validate_comment(candidate: &CommentFields) -> Vec<String> {
    let mut violations = Vec::new();

    push(&mut violations, check_min_length(&candidate.title, COMMENT_TITLE_MIN, "titleLength"));
    push(&mut violations, check_length(&candidate.content, COMMENT_CONTENT_MIN, COMMENT_CONTENT_MAX, "contentLength"));

    violations
}

fn push(violations: &mut Vec<String>, result: Result<(), ValidationError>) {
    if let Err(error) = result {
        violations.push(error.code.to_string());
    }
}

/// Validate string length in an inclusive character range
fn check_length(value: &str, min: usize, max: usize, code: &'static str) -> Result<(), ValidationError> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(ValidationError::new(code));
    }
    Ok(())
}

fn check_min_length(value: &str, min: usize, code: &'static str) -> Result<(), ValidationError> {
    if value.chars().count() < min {
        return Err(ValidationError::new(code));
    }
    Ok(())
}

fn check_price(price: i64) -> Result<(), ValidationError> {
    if price < 0 {
        return Err(ValidationError::new("negativePrice"));
    }
    Ok(())
}

/// Closed-set membership test; unknown values fail, including
/// case-sensitive mismatches
fn check_category(category: &str) -> Result<(), ValidationError> {
    if !PRODUCT_CATEGORIES.contains(&category) {
        return Err(ValidationError::new("wrongCategory"));
    }
    Ok(())
}

/// Validate email against the organizational domain suffix
fn check_email_domain(email: &str, domain: &str) -> Result<(), ValidationError> {
    let suffix = format!("@{}", domain);
    if !email.ends_with(&suffix) || email.len() <= suffix.len() {
        return Err(ValidationError::new("invalidEmailDomain"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn rules() -> AccountRules {
        AccountRules {
            allowed_email_domain: "student.ju.se".to_string(),
            min_password_length: 8,
        }
    }

    fn valid_post() -> ProductPostFields {
        ProductPostFields {
            title: "Desk".to_string(),
            price: 50,
            category: "Furniture".to_string(),
            content: "Solid oak desk for sale".to_string(),
            created_at: 1_700_000_000,
            account_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn valid_product_post_has_no_violations() {
        assert!(validate_product_post(&valid_post()).is_empty());
    }

    #[test]
    fn product_post_violations_are_reported_in_field_order() {
        let candidate = ProductPostFields {
            title: "ab".to_string(),
            price: -1,
            category: "furniture".to_string(),
            content: "too short".to_string(),
            ..valid_post()
        };

        assert_eq!(
            validate_product_post(&candidate),
            vec!["titleLength", "negativePrice", "wrongCategory", "contentLength"]
        );
    }

    #[test]
    fn category_check_is_case_sensitive() {
        let candidate = ProductPostFields {
            category: "FURNITURE".to_string(),
            ..valid_post()
        };
        assert_eq!(validate_product_post(&candidate), vec!["wrongCategory"]);
    }

    #[test]
    fn price_of_zero_is_allowed() {
        let candidate = ProductPostFields {
            price: 0,
            ..valid_post()
        };
        assert!(validate_product_post(&candidate).is_empty());
    }

    #[test]
    fn title_boundaries_are_inclusive() {
        let short = ProductPostFields { title: "abc".to_string(), ..valid_post() };
        let long = ProductPostFields { title: "a".repeat(50), ..valid_post() };
        let too_long = ProductPostFields { title: "a".repeat(51), ..valid_post() };

        assert!(validate_product_post(&short).is_empty());
        assert!(validate_product_post(&long).is_empty());
        assert_eq!(validate_product_post(&too_long), vec!["titleLength"]);
    }

    #[test]
    fn valid_account_has_no_violations() {
        let candidate = AccountCandidate {
            email: "a@student.ju.se",
            password: Some("longenoughpw"),
            username: "alice",
        };
        assert!(validate_account(&candidate, &rules()).is_empty());
    }

    #[test]
    fn account_with_foreign_domain_and_short_password_fails_in_order() {
        let candidate = AccountCandidate {
            email: "a@example.com",
            password: Some("short"),
            username: "al",
        };
        assert_eq!(
            validate_account(&candidate, &rules()),
            vec!["invalidEmailDomain", "passwordLength", "usernameLength"]
        );
    }

    #[test]
    fn bare_domain_suffix_without_local_part_fails() {
        let candidate = AccountCandidate {
            email: "@student.ju.se",
            password: Some("longenoughpw"),
            username: "alice",
        };
        assert_eq!(validate_account(&candidate, &rules()), vec!["invalidEmailDomain"]);
    }

    #[test]
    fn password_is_skipped_when_not_being_changed() {
        let candidate = AccountCandidate {
            email: "a@student.ju.se",
            password: None,
            username: "alice",
        };
        assert!(validate_account(&candidate, &rules()).is_empty());
    }

    #[test]
    fn comment_title_floor_is_three_chars() {
        let ok = CommentFields {
            title: "Hey".to_string(),
            content: "Is this still available?".to_string(),
            created_at: 1_700_000_100,
            account_id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
        };
        assert!(validate_comment(&ok).is_empty());

        let short = CommentFields { title: "Hi".to_string(), ..ok.clone() };
        assert_eq!(validate_comment(&short), vec!["titleLength"]);
    }

    #[test]
    fn comment_content_bounds() {
        let base = CommentFields {
            title: "Hey".to_string(),
            content: "ok".to_string(),
            created_at: 1_700_000_100,
            account_id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
        };
        assert!(validate_comment(&base).is_empty());

        let empty = CommentFields { content: "x".to_string(), ..base.clone() };
        assert_eq!(validate_comment(&empty), vec!["contentLength"]);

        let huge = CommentFields { content: "x".repeat(1001), ..base };
        assert_eq!(validate_comment(&huge), vec!["contentLength"]);
    }
}
