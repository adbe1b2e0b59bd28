//! Email templates.
//!
//! One builder per notification email; each returns `(subject, text, html)`.

/// Subject, plain-text body and HTML body of one email.
pub struct EmailContent {
    pub subject: String,
    pub text: String,
    pub html: String,
}

fn wrap_html(inner: String) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">{inner}</div>"
    )
}

pub fn invitation(sender_name: &str, board_name: &str, invitation_link: &str) -> EmailContent {
    EmailContent {
        subject: format!("You've been invited to join \"{board_name}\""),
        text: format!(
            "{sender_name} has invited you to collaborate on the board \"{board_name}\". \
             Log in to accept or reject this invitation."
        ),
        html: wrap_html(format!(
            "<h2>Board Invitation</h2>\
             <p><strong>{sender_name}</strong> has invited you to join the board \
             <strong>\"{board_name}\"</strong>.</p>\
             <p>Log in to CollabBoard to accept or reject this invitation.</p>\
             <p><a href=\"{invitation_link}\">View Invitation</a></p>"
        )),
    }
}

pub fn join_request(requester_name: &str, board_name: &str) -> EmailContent {
    EmailContent {
        subject: format!("Join request for \"{board_name}\""),
        text: format!(
            "{requester_name} has requested to join your board \"{board_name}\". \
             Log in to approve or reject this request."
        ),
        html: wrap_html(format!(
            "<h2>Join Request</h2>\
             <p><strong>{requester_name}</strong> wants to join your board \
             <strong>\"{board_name}\"</strong>.</p>\
             <p>Log in to CollabBoard to review and respond to this request.</p>"
        )),
    }
}

pub fn collaboration_request(requester_name: &str, board_name: &str) -> EmailContent {
    EmailContent {
        subject: format!("Admin collaboration request for \"{board_name}\""),
        text: format!(
            "Admin {requester_name} wants to collaborate on your board \"{board_name}\"."
        ),
        html: wrap_html(format!(
            "<h2>Collaboration Request</h2>\
             <p>Admin <strong>{requester_name}</strong> wants to collaborate on your board \
             <strong>\"{board_name}\"</strong>.</p>\
             <p>Log in to review and respond to this request.</p>"
        )),
    }
}

pub fn request_accepted(board_name: &str, accepted_by: &str) -> EmailContent {
    EmailContent {
        subject: format!("Your request to join \"{board_name}\" was accepted"),
        text: format!(
            "Great news! {accepted_by} has accepted your request to join \"{board_name}\"."
        ),
        html: wrap_html(format!(
            "<h2>Request Accepted</h2>\
             <p>Great news! <strong>{accepted_by}</strong> has accepted your request to join \
             <strong>\"{board_name}\"</strong>.</p>\
             <p>You can now access the board and start collaborating.</p>"
        )),
    }
}

pub fn request_rejected(board_name: &str, rejected_by: &str, reason: Option<&str>) -> EmailContent {
    let reason_text = match reason {
        Some(reason) => format!(" Reason: {reason}"),
        None => String::new(),
    };
    let reason_html = match reason {
        Some(reason) => format!("<p><strong>Reason:</strong> {reason}</p>"),
        None => String::new(),
    };
    EmailContent {
        subject: format!("Your request to join \"{board_name}\" was declined"),
        text: format!(
            "{rejected_by} has declined your request to join \"{board_name}\".{reason_text}"
        ),
        html: wrap_html(format!(
            "<h2>Request Declined</h2>\
             <p><strong>{rejected_by}</strong> has declined your request to join \
             <strong>\"{board_name}\"</strong>.</p>{reason_html}"
        )),
    }
}

pub fn removal(board_name: &str, removed_by: &str, reason: Option<&str>) -> EmailContent {
    let reason_text = match reason {
        Some(reason) => format!(" Reason: {reason}"),
        None => String::new(),
    };
    let reason_html = match reason {
        Some(reason) => format!("<p><strong>Reason:</strong> {reason}</p>"),
        None => String::new(),
    };
    EmailContent {
        subject: format!("You've been removed from \"{board_name}\""),
        text: format!("{removed_by} has removed you from \"{board_name}\".{reason_text}"),
        html: wrap_html(format!(
            "<h2>Board Access Removed</h2>\
             <p><strong>{removed_by}</strong> has removed you from the board \
             <strong>\"{board_name}\"</strong>.</p>{reason_html}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invitation_embeds_link_and_board() {
        let email = invitation("Alice", "Roadmap", "http://localhost:5173/messages");
        assert!(email.subject.contains("Roadmap"));
        assert!(email.text.contains("Alice"));
        assert!(email.html.contains("http://localhost:5173/messages"));
    }

    #[test]
    fn rejection_reason_is_optional() {
        let with = request_rejected("Roadmap", "Dana", Some("not now"));
        assert!(with.text.contains("Reason: not now"));
        assert!(with.html.contains("not now"));

        let without = request_rejected("Roadmap", "Dana", None);
        assert!(!without.text.contains("Reason"));
        assert!(!without.html.contains("Reason"));
    }

    #[test]
    fn removal_names_the_remover() {
        let email = removal("Roadmap", "Alice", None);
        assert!(email.subject.contains("removed from"));
        assert!(email.text.contains("Alice"));
    }
}
