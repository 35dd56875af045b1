use utoipa::OpenApi;

use crate::routes::{health, qrcodes};

#[derive(OpenApi)]
#[openapi(info(
    title = "qrcodes-server",
    description = "QR-code registry API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(qrcodes::QrCodesApi::openapi());
    root
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_lists_record_paths() {
        let doc = get_docs();
        for path in [
            "/health",
            "/api/qrcodes/",
            "/api/qrcodes/{id}/",
            "/api/qrcodes/verify/",
            "/api/qrcodes/stats/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
