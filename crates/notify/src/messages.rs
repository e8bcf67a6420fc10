//! Plain-text subject/body builders for every notification the platform
//! sends. Kept free of transport concerns so they are trivially testable.

/// Email sent after registration with the verification link.
pub fn verification_email(full_name: &str, verify_link: &str) -> (String, String) {
    let subject = "[EduAlert] Verify your email address".to_string();
    let body = format!(
        "Hello {full_name},\n\n\
         An EduAlert officer account was registered with this address.\n\
         Verify your email by visiting the link below within 48 hours:\n\n\
         {verify_link}\n\n\
         After verification, an administrator must approve your account\n\
         before you can sign in.\n\n\
         If you did not register, you can ignore this message.\n"
    );
    (subject, body)
}

/// Email sent by the forgot-password flow with the reset link.
pub fn password_reset_email(full_name: &str, reset_link: &str) -> (String, String) {
    let subject = "[EduAlert] Password reset requested".to_string();
    let body = format!(
        "Hello {full_name},\n\n\
         A password reset was requested for your EduAlert account.\n\
         The link below is valid for one hour:\n\n\
         {reset_link}\n\n\
         If you did not request a reset, you can ignore this message.\n"
    );
    (subject, body)
}

/// Email fanned out to subscribed officers (and all senior staff) when a
/// new report passes triage.
pub fn report_approved_email(
    full_name: &str,
    reference_number: &str,
    school_name: &str,
    teacher_name: &str,
) -> (String, String) {
    let subject = format!("[EduAlert] New report {reference_number}");
    let body = format!(
        "Hello {full_name},\n\n\
         A new teacher-absence report matching your area has been received\n\
         and passed automated screening.\n\n\
         Reference: {reference_number}\n\
         School:    {school_name}\n\
         Teacher:   {teacher_name}\n\n\
         Sign in to the EduAlert portal to review it.\n"
    );
    (subject, body)
}

/// Email sent to an officer when they are assigned to a report.
pub fn assignment_email(
    full_name: &str,
    reference_number: &str,
    school_name: &str,
    priority: &str,
) -> (String, String) {
    let subject = format!("[EduAlert] You were assigned report {reference_number}");
    let body = format!(
        "Hello {full_name},\n\n\
         You have been assigned to investigate a teacher-absence report.\n\n\
         Reference: {reference_number}\n\
         School:    {school_name}\n\
         Priority:  {priority}\n\n\
         Sign in to the EduAlert portal for the full details.\n"
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_email_contains_link() {
        let (subject, body) =
            verification_email("Jane Officer", "https://portal.example/verify?token=abc");
        assert!(subject.contains("Verify"));
        assert!(body.contains("Jane Officer"));
        assert!(body.contains("token=abc"));
    }

    #[test]
    fn approved_email_names_the_report() {
        let (subject, body) = report_approved_email(
            "Jane Officer",
            "EDU20260042",
            "St. Margaret's Primary",
            "John Smith",
        );
        assert!(subject.contains("EDU20260042"));
        assert!(body.contains("St. Margaret's Primary"));
        assert!(body.contains("John Smith"));
    }

    #[test]
    fn assignment_email_includes_priority() {
        let (_, body) = assignment_email("J", "EDU20260001", "School", "high");
        assert!(body.contains("Priority:  high"));
    }
}
