use crate::core::{Probe, ProbeResponse, SignedRequest};
use crate::oauth::OAuthStamp;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ProbeEngine<P: Probe> {
    probe: P,
}

impl<P: Probe> ProbeEngine<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub async fn run(&self) -> Result<ProbeResponse> {
        let started = Instant::now();

        // 讀取 secret
        let consumer = self.probe.credentials().await?;

        // 簽章
        let request = self.probe.prepare(&consumer, &OAuthStamp::fresh())?;
        tracing::info!("📤 {} {}", request.method, request.url);

        // 送出請求
        let response = self.probe.execute(request).await?;
        tracing::info!(
            "✅ HTTP {} ({} bytes) in {:?}",
            response.status,
            response.body.len(),
            started.elapsed()
        );

        Ok(response)
    }

    /// 只簽章不送出
    pub async fn dry_run(&self) -> Result<SignedRequest> {
        let consumer = self.probe.credentials().await?;
        let request = self.probe.prepare(&consumer, &OAuthStamp::fresh())?;
        tracing::info!("🔍 Dry run, request not sent: {} {}", request.method, request.url);
        Ok(request)
    }
}
