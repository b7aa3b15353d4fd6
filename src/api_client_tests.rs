#[cfg(test)]
mod tests {
    use crate::api_client::{
        ApiClient, ApiError, DEFAULT_DEV_URL, DeployMode, HttpTransport, resolve_api_url,
    };
    use reqwest::blocking::multipart::Form;
    use std::cell::RefCell;

    /// Transport double recording every requested URL.
    #[derive(Default)]
    struct RecordingTransport {
        urls: RefCell<Vec<String>>,
        body: String,
    }

    impl RecordingTransport {
        fn with_body(body: &str) -> Self {
            Self {
                urls: RefCell::new(Vec::new()),
                body: body.to_string(),
            }
        }
    }

    impl HttpTransport for RecordingTransport {
        fn get_text(&self, url: &str) -> Result<String, ApiError> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }

        fn post_text(
            &self,
            url: &str,
            _body: String,
            _content_type: &'static str,
        ) -> Result<String, ApiError> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }

        fn post_multipart(&self, url: &str, _form: Form) -> Result<String, ApiError> {
            self.urls.borrow_mut().push(url.to_string());
            Ok(self.body.clone())
        }
    }

    #[test]
    fn test_url_resolution_production() {
        let url = resolve_api_url(DeployMode::Production, Some("chem.example.org"), None);
        assert_eq!(url, "http://chem.example.org:3000");

        // with no host configured the docker-internal name is assumed
        let url = resolve_api_url(DeployMode::Production, None, None);
        assert_eq!(url, "http://backend:3000");

        // the development override is ignored in production
        let url = resolve_api_url(
            DeployMode::Production,
            Some("chem.example.org"),
            Some("http://evil:9999"),
        );
        assert_eq!(url, "http://chem.example.org:3000");
    }

    #[test]
    fn test_url_resolution_development() {
        let url = resolve_api_url(DeployMode::Development, None, Some("http://127.0.0.1:8080"));
        assert_eq!(url, "http://127.0.0.1:8080");

        let url = resolve_api_url(DeployMode::Development, None, None);
        assert_eq!(url, DEFAULT_DEV_URL);
    }

    #[test]
    fn test_url_resolution_is_deterministic() {
        for mode in [DeployMode::Production, DeployMode::Development] {
            let first = resolve_api_url(mode, Some("host"), Some("http://override:1"));
            let second = resolve_api_url(mode, Some("host"), Some("http://override:1"));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_endpoint_construction() {
        let client =
            ApiClient::with_client("http://localhost:3000", RecordingTransport::default()).unwrap();

        let url = client.endpoint("/latest/stout/health", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/latest/stout/health");

        let url = client
            .endpoint("/latest/stout/IUPAC2SMILES", &[("input_text", "ethanol")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/latest/stout/IUPAC2SMILES?input_text=ethanol"
        );
    }

    #[test]
    fn test_query_pairs_are_encoded() {
        let client =
            ApiClient::with_client("http://localhost:3000", RecordingTransport::default()).unwrap();
        let url = client
            .endpoint(
                "/latest/stout/IUPAC2SMILES",
                &[("input_text", "2-methylpropan-2-ol & water")],
            )
            .unwrap();
        assert!(
            url.as_str()
                .contains("input_text=2-methylpropan-2-ol+%26+water")
        );
    }

    #[test]
    fn test_get_goes_through_transport() {
        let transport = RecordingTransport::with_body("OK");
        let client = ApiClient::with_client("http://localhost:3000", transport).unwrap();

        let body = client.get("/latest/stout/health", &[]).unwrap();
        assert_eq!(body, "OK");
        assert_eq!(
            client.transport().urls.borrow().as_slice(),
            ["http://localhost:3000/latest/stout/health"]
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = ApiClient::with_client("not a url", RecordingTransport::default());
        assert!(matches!(result, Err(ApiError::Url(_))));
    }
}
