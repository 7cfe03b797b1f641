//! Notification email composed from a contact submission

use super::contact::ContactSubmission;
use serde::Serialize;

/// An outgoing notification email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub from: String,
    pub to: String,
    /// Address replies should go to: the person who filled in the form
    pub reply_to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Compose the email sent to the site owner for a submission
    pub fn for_submission(submission: &ContactSubmission, from: &str, to: &str) -> Self {
        let consent = if submission.is_privacy_policy_accepted { "yes" } else { "no" };
        let body = format!(
            "Name: {}\nEmail: {}\nPrivacy policy accepted: {}\n\n{}\n",
            submission.name, submission.email, consent, submission.message
        );

        Self {
            from: from.to_string(),
            to: to.to_string(),
            reply_to: submission.email.clone(),
            subject: submission.subject.clone(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_submission() {
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello there".to_string(),
            is_privacy_policy_accepted: true,
        };

        let notification = Notification::for_submission(&submission, "site@example.com", "me@example.com");
        assert_eq!(notification.from, "site@example.com");
        assert_eq!(notification.to, "me@example.com");
        assert_eq!(notification.reply_to, "ada@example.com");
        assert_eq!(notification.subject, "Hi");
        assert!(notification.body.contains("Name: Ada"));
        assert!(notification.body.contains("Privacy policy accepted: yes"));
        assert!(notification.body.ends_with("Hello there\n"));
    }
}
