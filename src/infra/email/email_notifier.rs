use std::sync::Arc;
use async_trait::async_trait;
use tera::{Context, Tera};
use tracing::{error, info};
use crate::domain::models::registration::RegistrationNotice;
use crate::domain::ports::{EmailService, Notifier};
use crate::error::AppError;

pub const REGISTRATION_TEMPLATE: &str = "registration_confirmation.html";
pub const PAYMENT_TEMPLATE: &str = "payment_confirmation.html";

/// Renders registration mail through tera and hands it to an `EmailService`.
pub struct EmailNotifier {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
}

impl EmailNotifier {
    pub fn new(email_service: Arc<dyn EmailService>, templates: Arc<Tera>) -> Self {
        Self { email_service, templates }
    }

    fn render(&self, template: &str, notice: &RegistrationNotice) -> Result<String, AppError> {
        let context = Context::from_serialize(notice).map_err(|e| {
            error!("Tera context error: {:?}", e);
            AppError::InternalWithMsg(format!("Tera context error: {}", e))
        })?;

        self.templates.render(template, &context).map_err(|e| {
            error!("Tera render error: {:?}", e);
            AppError::InternalWithMsg(format!("Tera render error: {}", e))
        })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, notice: &RegistrationNotice) -> Result<(), AppError> {
        let body = self.render(REGISTRATION_TEMPLATE, notice)?;
        let subject = format!("Registration confirmed - {}", notice.event_name);

        self.email_service.send(&notice.recipient, &subject, &body).await?;
        info!("Registration confirmation sent to {}", notice.recipient);
        Ok(())
    }

    async fn send_payment_confirmation(&self, notice: &RegistrationNotice) -> Result<(), AppError> {
        let body = self.render(PAYMENT_TEMPLATE, notice)?;
        let subject = format!("Payment confirmed - {}", notice.event_name);

        self.email_service.send(&notice.recipient, &subject, &body).await?;
        info!("Payment confirmation sent to {}", notice.recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::factory::load_templates;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingEmail {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl EmailService for CapturingEmail {
        async fn send(&self, recipient: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
            self.sent.lock().unwrap().push((recipient.into(), subject.into(), html_body.into()));
            Ok(())
        }
    }

    fn notice(is_online: bool) -> RegistrationNotice {
        RegistrationNotice {
            recipient: "dana@example.com".into(),
            name: "Dana".into(),
            phone: "0800".into(),
            job: "Engineer".into(),
            event_name: "RustConf".into(),
            event_description: "Talks".into(),
            event_date: "2030-01-02".into(),
            event_time: "09:00".into(),
            location: if is_online { "Online".into() } else { "Bandung".into() },
            address: "Jl. Asia Afrika 1".into(),
            mode: if is_online { "online".into() } else { "offline".into() },
            link: "https://meet.example.com/abc".into(),
            is_online,
            payment_method: Some("transfer".into()),
        }
    }

    #[tokio::test]
    async fn test_online_and_offline_bodies_differ() {
        let email = Arc::new(CapturingEmail::default());
        let notifier = EmailNotifier::new(email.clone(), Arc::new(load_templates()));

        notifier.send(&notice(true)).await.unwrap();
        notifier.send(&notice(false)).await.unwrap();

        let sent = email.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].1, "Registration confirmed - RustConf");
        assert!(sent[0].2.contains("meet.example.com"));
        assert!(!sent[0].2.contains("Jl. Asia Afrika 1"));
        assert!(sent[1].2.contains("Jl. Asia Afrika 1"));
        assert!(sent[1].2.contains("Bandung"));
    }

    #[tokio::test]
    async fn test_payment_confirmation_names_method() {
        let email = Arc::new(CapturingEmail::default());
        let notifier = EmailNotifier::new(email.clone(), Arc::new(load_templates()));

        notifier.send_payment_confirmation(&notice(false)).await.unwrap();

        let sent = email.sent.lock().unwrap();
        assert_eq!(sent[0].0, "dana@example.com");
        assert!(sent[0].1.starts_with("Payment confirmed"));
        assert!(sent[0].2.contains("transfer"));
    }
}
