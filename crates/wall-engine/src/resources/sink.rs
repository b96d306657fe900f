use std::sync::Arc;

use super::{Asset, ResourceError, ResourceStore, Texture};

/// Receiver of background fetch completions.
///
/// Called on the main thread while the frame step drains its message queue,
/// never from the fetch worker itself.
pub trait FetchListener {
    fn on_download_succeeded(&mut self, name: &str, data: &[u8]);
    fn on_download_failed(&mut self, name: &str, reason: &str);
}

/// What a drain pass changed.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Names attached (or replaced) in the store, in completion order.
    pub attached: Vec<String>,
    pub failures: Vec<ResourceError>,
}

impl FetchReport {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.failures.is_empty()
    }
}

/// Completes store population from fetched bytes.
///
/// Successful downloads are decoded as [`Texture`]s and attached; decode
/// failures and failed downloads are recorded in the report rather than
/// dropped.
pub struct ResourceFetchSink<'a> {
    store: &'a mut ResourceStore,
    report: FetchReport,
}

impl<'a> ResourceFetchSink<'a> {
    pub fn new(store: &'a mut ResourceStore) -> Self {
        Self {
            store,
            report: FetchReport::default(),
        }
    }

    pub fn finish(self) -> FetchReport {
        self.report
    }
}

impl FetchListener for ResourceFetchSink<'_> {
    fn on_download_succeeded(&mut self, name: &str, data: &[u8]) {
        match Texture::decode(name, data) {
            Ok(texture) => {
                let texture: Arc<Texture> = self.store.attach(name, texture);
                let size = texture.size();
                log::info!("asset `{name}` fetched ({}x{})", size.width, size.height);
                self.report.attached.push(name.to_string());
            }
            Err(err) => {
                log::warn!("fetched asset `{name}` could not be decoded: {err}");
                self.report.failures.push(err);
            }
        }
    }

    fn on_download_failed(&mut self, name: &str, reason: &str) {
        log::warn!("download of `{name}` failed: {reason}");
        self.report.failures.push(ResourceError::DownloadFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn success_attaches_texture() {
        let mut store = ResourceStore::new();
        let mut sink = ResourceFetchSink::new(&mut store);
        sink.on_download_succeeded("wall", &png_bytes());
        let report = sink.finish();

        assert_eq!(report.attached, vec!["wall".to_string()]);
        assert!(report.failures.is_empty());
        assert!(store.find::<Texture>("wall").is_some());
    }

    #[test]
    fn undecodable_payload_is_recorded() {
        let mut store = ResourceStore::new();
        let mut sink = ResourceFetchSink::new(&mut store);
        sink.on_download_succeeded("wall", b"junk");
        let report = sink.finish();

        assert!(report.attached.is_empty());
        assert!(matches!(report.failures[0], ResourceError::Decode { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn failure_is_recorded_not_dropped() {
        let mut store = ResourceStore::new();
        let mut sink = ResourceFetchSink::new(&mut store);
        sink.on_download_failed("wall", "connection reset");
        let report = sink.finish();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].asset_name(), Some("wall"));
        assert!(!report.is_empty());
    }
}
