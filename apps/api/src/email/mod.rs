use resend_rs::{types::CreateEmailBaseOptions, Resend};

/// Outbound mail over the Resend API. Cloned into `AppState`; a client is
/// built per send, which is cheap (the SDK holds only an HTTP handle).
#[derive(Clone)]
pub struct Mailer {
    api_key: String,
    pub domain: String,
}

impl Mailer {
    pub fn new(api_key: String, domain: String) -> Self {
        Self { api_key, domain }
    }

    pub async fn send_password_reset(
        &self,
        to: String,
        name: String,
        reset_link: String,
    ) -> Result<(), resend_rs::Error> {
        let resend = Resend::new(&self.api_key);

        let from = format!("JobSync <noreply@{}>", &self.domain);
        let to = [to];
        let subject = "Reset your JobSync password";

        let html = format!(
            "<p>Hi {},</p>\
             <p>You requested a password reset. Click the link below to set a new password:</p>\
             <p><a href=\"{link}\">{link}</a></p>\
             <p>If you didn't request this, you can ignore this email.</p>",
            name,
            link = reset_link
        );

        let email = CreateEmailBaseOptions::new(from, to, subject).with_html(&html);

        let _email = resend.emails.send(email).await?;

        Ok(())
    }
}
