#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use chrono::NaiveDate;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tradelog::libs::card::SummaryCard;
    use tradelog::libs::config::Config;
    use tradelog::libs::export::{Bitmap, ExportError, ExportedArtifact, PdfExporter, Rasterizer};
    use tradelog::libs::job::Job;
    use tradelog::libs::share::{
        encode_component, mailto_link, whatsapp_link, LinkTarget, ShareDispatcher, ShareOutcome, SharePlatform, ShareRequest, ShareStatus, StatusHandle,
        SHARE_TITLE,
    };
    use tradelog::libs::summary::format_job_as_text;
    use uuid::Uuid;

    fn sample_job() -> Job {
        Job {
            id: Uuid::new_v4(),
            client_name: "Jane Doe".to_string(),
            address: "12 High Street".to_string(),
            description: "Fixed leak & replaced tap".to_string(),
            materials: String::new(),
            timestamp: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            time_in: "09:00".to_string(),
            time_out: "10:30".to_string(),
            coordinates: None,
        }
    }

    fn sample_config() -> Config {
        Config {
            user_email: "me@example.com".to_string(),
            recipient_email: "office@example.com".to_string(),
            download_dir: None,
        }
    }

    struct TinyRasterizer;

    impl Rasterizer for TinyRasterizer {
        fn rasterize(&self, _card: &SummaryCard, _scale: f32) -> Result<Bitmap, ExportError> {
            Bitmap::from_rgb(2, 1, vec![255; 6])
        }
    }

    struct BrokenRasterizer;

    impl Rasterizer for BrokenRasterizer {
        fn rasterize(&self, _card: &SummaryCard, _scale: f32) -> Result<Bitmap, ExportError> {
            Err(ExportError::Raster("no canvas".to_string()))
        }
    }

    /// Counts how many cards were rendered through it.
    #[derive(Default)]
    struct CountingRasterizer {
        renders: Arc<AtomicUsize>,
    }

    impl Rasterizer for CountingRasterizer {
        fn rasterize(&self, _card: &SummaryCard, _scale: f32) -> Result<Bitmap, ExportError> {
            self.renders.fetch_add(1, Ordering::SeqCst);
            Bitmap::from_rgb(1, 1, vec![255; 3])
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Share { file_name: String, title: String, text: String },
        Open { url: String, target: LinkTarget },
        Save { file_name: String },
    }

    /// Records every platform call and the busy flags seen while it ran.
    #[derive(Default)]
    struct FakePlatform {
        native_share: bool,
        share_fails: bool,
        open_fails: bool,
        save_fails: bool,
        calls: Arc<Mutex<Vec<Call>>>,
        observed: Arc<Mutex<Vec<ShareStatus>>>,
        status: Arc<Mutex<Option<StatusHandle>>>,
    }

    impl FakePlatform {
        fn observe(&self) {
            if let Some(handle) = self.status.lock().as_ref() {
                self.observed.lock().push(handle.get());
            }
        }
    }

    impl SharePlatform for FakePlatform {
        fn can_share_files(&self, artifact: &ExportedArtifact) -> bool {
            self.native_share && artifact.mime_type == "application/pdf"
        }

        async fn share_files(&self, request: ShareRequest<'_>) -> Result<()> {
            self.observe();
            self.calls.lock().push(Call::Share {
                file_name: request.artifact.file_name.clone(),
                title: request.title.to_string(),
                text: request.text.to_string(),
            });
            if self.share_fails {
                return Err(anyhow!("AbortError: Share canceled"));
            }
            Ok(())
        }

        fn open_url(&self, url: &str, target: LinkTarget) -> Result<()> {
            self.observe();
            self.calls.lock().push(Call::Open { url: url.to_string(), target });
            if self.open_fails {
                return Err(anyhow!("no browser"));
            }
            Ok(())
        }

        async fn save_file(&self, artifact: &ExportedArtifact) -> Result<PathBuf> {
            self.observe();
            self.calls.lock().push(Call::Save {
                file_name: artifact.file_name.clone(),
            });
            if self.save_fails {
                return Err(anyhow!("disk full"));
            }
            Ok(PathBuf::from("/downloads").join(&artifact.file_name))
        }
    }

    fn dispatcher<R: Rasterizer>(platform: FakePlatform, rasterizer: R) -> ShareDispatcher<FakePlatform, R> {
        let status = Arc::clone(&platform.status);
        let dispatcher = ShareDispatcher::new(sample_job(), &sample_config(), platform, PdfExporter::new(rasterizer));
        *status.lock() = Some(dispatcher.status_handle());
        dispatcher
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("a b&c/d?e=f"), "a%20b%26c%2Fd%3Fe%3Df");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_component("line\nbreak"), "line%0Abreak");
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn test_whatsapp_link() {
        assert_eq!(whatsapp_link("Hi there"), "https://wa.me/?text=Hi%20there");
    }

    #[test]
    fn test_mailto_link_keeps_addresses_as_typed() {
        let link = mailto_link("office@example.com", "me@example.com", "Job Summary: Jane", "a b");
        assert_eq!(link, "mailto:office@example.com?cc=me@example.com&subject=Job%20Summary%3A%20Jane&body=a%20b");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(ShareStatus::default().status_text(), None);
        let downloading = ShareStatus { downloading: true, sharing: false };
        assert_eq!(downloading.status_text(), Some("Generating PDF..."));
        let sharing = ShareStatus { downloading: false, sharing: true };
        assert_eq!(sharing.status_text(), Some("Preparing to share..."));
        assert!(sharing.is_busy());
    }

    #[tokio::test]
    async fn test_download_saves_pdf_while_busy() {
        let dispatcher = dispatcher(FakePlatform::default(), TinyRasterizer);

        let path = dispatcher.download().await.unwrap();
        assert_eq!(path, PathBuf::from("/downloads/Jane-Doe-2024-03-05.pdf"));
        assert_eq!(dispatcher.platform().calls.lock().clone(), vec![Call::Save {
            file_name: "Jane-Doe-2024-03-05.pdf".to_string()
        }]);
        assert_eq!(dispatcher.platform().observed.lock().clone(), vec![ShareStatus { downloading: true, sharing: false }]);
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_download_failure_clears_busy_flag() {
        let dispatcher = dispatcher(FakePlatform::default(), BrokenRasterizer);

        assert!(dispatcher.download().await.is_none());
        assert!(dispatcher.platform().calls.lock().is_empty());
        assert_eq!(dispatcher.status(), ShareStatus::default());
    }

    #[tokio::test]
    async fn test_download_save_failure_returns_none() {
        let platform = FakePlatform {
            save_fails: true,
            ..Default::default()
        };
        let dispatcher = dispatcher(platform, TinyRasterizer);

        assert!(dispatcher.download().await.is_none());
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_whatsapp_native_share_sends_pdf_with_caption() {
        let platform = FakePlatform {
            native_share: true,
            ..Default::default()
        };
        let dispatcher = dispatcher(platform, TinyRasterizer);

        assert_eq!(dispatcher.share_to_whatsapp().await, ShareOutcome::FileShared);
        assert_eq!(dispatcher.platform().calls.lock().clone(), vec![Call::Share {
            file_name: "Jane-Doe-2024-03-05.pdf".to_string(),
            title: SHARE_TITLE.to_string(),
            text: "Here is the job summary for Jane Doe.".to_string(),
        }]);
        assert_eq!(dispatcher.platform().observed.lock().clone(), vec![ShareStatus { downloading: false, sharing: true }]);
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_whatsapp_cancelled_share_is_dismissed_without_fallback() {
        let platform = FakePlatform {
            native_share: true,
            share_fails: true,
            ..Default::default()
        };
        let dispatcher = dispatcher(platform, TinyRasterizer);

        assert_eq!(dispatcher.share_to_whatsapp().await, ShareOutcome::Dismissed);
        let calls = dispatcher.platform().calls.lock().clone();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Call::Share { .. }));
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_whatsapp_falls_back_to_text_link() {
        let dispatcher = dispatcher(FakePlatform::default(), TinyRasterizer);

        assert_eq!(dispatcher.share_to_whatsapp().await, ShareOutcome::TextFallback);
        let expected = format!("https://wa.me/?text={}", encode_component(&format_job_as_text(dispatcher.job())));
        assert_eq!(dispatcher.platform().calls.lock().clone(), vec![Call::Open {
            url: expected,
            target: LinkTarget::NewContext,
        }]);
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_whatsapp_falls_back_when_export_fails() {
        let platform = FakePlatform {
            native_share: true,
            ..Default::default()
        };
        let dispatcher = dispatcher(platform, BrokenRasterizer);

        assert_eq!(dispatcher.share_to_whatsapp().await, ShareOutcome::TextFallback);
        let calls = dispatcher.platform().calls.lock().clone();
        assert!(matches!(&calls[..], [Call::Open { target: LinkTarget::NewContext, .. }]));
        assert!(!dispatcher.is_busy());
    }

    #[tokio::test]
    async fn test_whatsapp_reports_failed_fallback() {
        let platform = FakePlatform {
            open_fails: true,
            ..Default::default()
        };
        let dispatcher = dispatcher(platform, TinyRasterizer);

        assert_eq!(dispatcher.share_to_whatsapp().await, ShareOutcome::Failed);
        assert!(!dispatcher.is_busy());
    }

    #[test]
    fn test_email_opens_mailto_in_same_context() {
        let dispatcher = dispatcher(FakePlatform::default(), TinyRasterizer);

        let link = dispatcher.email().unwrap();
        assert!(link.starts_with("mailto:office@example.com?cc=me@example.com&subject=Job%20Summary%3A%20Jane%20Doe&body="));
        assert!(link.ends_with(&encode_component(&format_job_as_text(dispatcher.job()))));
        assert!(link.contains("Fixed%20leak%20%26%20replaced%20tap"));
        assert_eq!(dispatcher.platform().calls.lock().clone(), vec![Call::Open {
            url: link.clone(),
            target: LinkTarget::SameContext,
        }]);
        assert_eq!(dispatcher.platform().observed.lock().clone(), vec![ShareStatus::default()]);
    }

    #[test]
    fn test_email_propagates_open_failure() {
        let platform = FakePlatform {
            open_fails: true,
            ..Default::default()
        };
        let dispatcher = dispatcher(platform, TinyRasterizer);

        assert!(dispatcher.email().is_err());
    }

    #[test]
    fn test_file_name_follows_client_and_date() {
        let dispatcher = dispatcher(FakePlatform::default(), TinyRasterizer);
        assert_eq!(dispatcher.file_name(), "Jane-Doe-2024-03-05.pdf");
    }

    #[tokio::test]
    async fn test_dispatchers_share_one_exporter() {
        let rasterizer = CountingRasterizer::default();
        let renders = Arc::clone(&rasterizer.renders);
        let exporter = PdfExporter::new(rasterizer);

        let email = ShareDispatcher::new(sample_job(), &sample_config(), FakePlatform::default(), exporter.clone());
        email.email().unwrap();
        assert_eq!(renders.load(Ordering::SeqCst), 0);

        for _ in 0..2 {
            let download = ShareDispatcher::new(sample_job(), &sample_config(), FakePlatform::default(), exporter.clone());
            assert!(download.download().await.is_some());
        }
        assert_eq!(renders.load(Ordering::SeqCst), 2);
    }
}
