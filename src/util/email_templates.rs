use crate::model::quotation::Quotation;
use crate::util::email::EmailMessage;
use html_escape::encode_text;

const NOT_PROVIDED: &str = "Not provided";

/// Internal summary sent to the site owner for every accepted request.
pub fn owner_notification(quotation: &Quotation, owner_email: &str) -> EmailMessage {
    let subject = format!(
        "New Quotation Request: {} [{}]",
        quotation.service, quotation.ticket_id
    );
    EmailMessage::new(owner_email.to_string(), subject)
        .with_text_body(owner_notification_text(quotation))
        .with_html_body(owner_notification_html(quotation))
}

/// Receipt sent back to the person who filled in the form.
pub fn client_confirmation(quotation: &Quotation) -> EmailMessage {
    let subject = format!("We received your quotation request [{}]", quotation.ticket_id);
    EmailMessage::new(quotation.client_email.clone(), subject)
        .with_text_body(client_confirmation_text(quotation))
        .with_html_body(client_confirmation_html(quotation))
}

fn owner_notification_text(q: &Quotation) -> String {
    format!(
        r#"New quotation request received.

Ticket ID: {ticket_id}

Client
  Name: {name}
  Email: {email}
  Phone: {phone}
  Company: {company}
  Preferred contact: {contact}

Request
  Service: {service}
  Options: {options}
  Timeline: {timeline}
  Budget: {budget}

Project brief:
{brief}
"#,
        ticket_id = q.ticket_id,
        name = q.client_name,
        email = q.client_email,
        phone = q.client_phone.as_deref().unwrap_or(NOT_PROVIDED),
        company = q.client_company.as_deref().unwrap_or(NOT_PROVIDED),
        contact = q.preferred_contact,
        service = q.service,
        options = q.selected_options.join(", "),
        timeline = q.timeline,
        budget = q.budget,
        brief = q.project_brief,
    )
}

fn owner_notification_html(q: &Quotation) -> String {
    let options: String = q
        .selected_options
        .iter()
        .map(|o| format!("<li>{}</li>", encode_text(o)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>New Quotation Request</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }}
        .header {{ background-color: #111827; color: #ffffff; padding: 20px; border-radius: 8px 8px 0 0; }}
        .content {{ background-color: #ffffff; padding: 24px; border: 1px solid #dee2e6; }}
        .ticket {{ font-family: monospace; font-size: 18px; font-weight: bold; }}
        td {{ padding: 4px 12px 4px 0; vertical-align: top; }}
        .brief {{ background-color: #f8f9fa; padding: 12px; border-radius: 4px; white-space: pre-wrap; }}
    </style>
</head>
<body>
    <div class="header">
        <h2>New Quotation Request</h2>
        <p class="ticket">{ticket_id}</p>
    </div>
    <div class="content">
        <h3>Client</h3>
        <table>
            <tr><td>Name</td><td>{name}</td></tr>
            <tr><td>Email</td><td><a href="mailto:{email}">{email}</a></td></tr>
            <tr><td>Phone</td><td>{phone}</td></tr>
            <tr><td>Company</td><td>{company}</td></tr>
            <tr><td>Preferred contact</td><td>{contact}</td></tr>
        </table>
        <h3>Request</h3>
        <table>
            <tr><td>Service</td><td>{service}</td></tr>
            <tr><td>Options</td><td><ul>{options}</ul></td></tr>
            <tr><td>Timeline</td><td>{timeline}</td></tr>
            <tr><td>Budget</td><td>{budget}</td></tr>
        </table>
        <h3>Project brief</h3>
        <div class="brief">{brief}</div>
    </div>
</body>
</html>"#,
        ticket_id = encode_text(&q.ticket_id),
        name = encode_text(&q.client_name),
        email = encode_text(&q.client_email),
        phone = encode_text(q.client_phone.as_deref().unwrap_or(NOT_PROVIDED)),
        company = encode_text(q.client_company.as_deref().unwrap_or(NOT_PROVIDED)),
        contact = encode_text(&q.preferred_contact),
        service = encode_text(&q.service),
        options = options,
        timeline = encode_text(&q.timeline),
        budget = encode_text(&q.budget),
        brief = encode_text(&q.project_brief),
    )
}

fn client_confirmation_text(q: &Quotation) -> String {
    format!(
        r#"Hello {name},

Thank you for your quotation request for {service}.

Your ticket ID is: {ticket_id}
Please keep it for reference when contacting me about this request.

What happens next:
- I will review your project brief and requirements.
- You will receive a detailed quotation within 24-48 hours.
- I will reach out via your preferred contact method ({contact}).

Best regards

---
This is an automated message. Please do not reply to this email."#,
        name = q.client_name,
        service = q.service,
        ticket_id = q.ticket_id,
        contact = q.preferred_contact,
    )
}

fn client_confirmation_html(q: &Quotation) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Quotation Request Received</title>
    <style>
        body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }}
        .content {{ background-color: #ffffff; padding: 24px; border: 1px solid #dee2e6; border-radius: 8px; }}
        .ticket {{ background-color: #f8f9fa; padding: 12px; text-align: center; font-family: monospace; font-size: 20px; font-weight: bold; }}
        .footer {{ padding: 15px; text-align: center; font-size: 12px; color: #6c757d; }}
    </style>
</head>
<body>
    <div class="content">
        <p>Hello {name},</p>
        <p>Thank you for your quotation request for <strong>{service}</strong>.</p>
        <p>Your ticket ID:</p>
        <div class="ticket">{ticket_id}</div>
        <h3>What happens next</h3>
        <ul>
            <li>I will review your project brief and requirements.</li>
            <li>You will receive a detailed quotation within 24-48 hours.</li>
            <li>I will reach out via your preferred contact method ({contact}).</li>
        </ul>
        <p>Best regards</p>
    </div>
    <div class="footer">
        <p>This is an automated message. Please do not reply to this email.</p>
    </div>
</body>
</html>"#,
        name = encode_text(&q.client_name),
        service = encode_text(&q.service),
        ticket_id = encode_text(&q.ticket_id),
        contact = encode_text(&q.preferred_contact),
    )
}
