use async_trait::async_trait;
use lambda_http::Request;
use shop_common::request::request_path;
use shop_common::HandlerError;
use tracing::info;

/// Hands a checked-out basket to whatever processes orders.
///
/// No event schema exists yet for `basket.checkout`; implementations receive the
/// request untouched and decide what to send.
#[async_trait]
pub(crate) trait CheckoutPublisher: Send + Sync {
    async fn publish(&self, event: &Request) -> Result<(), HandlerError>;
}

/// Accepts every checkout and sends nothing anywhere.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LogOnlyCheckout;

#[async_trait]
impl CheckoutPublisher for LogOnlyCheckout {
    async fn publish(&self, event: &Request) -> Result<(), HandlerError> {
        info!(path = request_path(event), "checkout accepted, no order consumer wired up");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::{http, Body};

    #[tokio::test]
    async fn log_only_checkout_accepts_anything() {
        let event = http::Request::builder()
            .method("POST")
            .uri("/basket/checkout")
            .body(Body::from("not even json"))
            .unwrap();

        assert!(LogOnlyCheckout.publish(&event).await.is_ok());
    }
}
