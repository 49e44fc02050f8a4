use tracing::{error, info, instrument, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    ingredient::{entities::TermList, ports::TermListRepository, services::match_terms},
    label_analysis::{
        entities::LabelAnalysis,
        ports::{LLMClient, LabelAnalysisService},
        prompts::{EXTRACTION_PROMPT, analysis_prompt},
        value_objects::AnalyzeLabelInput,
    },
    photo::services::normalize_image,
};

impl<LLM, TL> LabelAnalysisService for Service<LLM, TL>
where
    LLM: LLMClient,
    TL: TermListRepository,
{
    #[instrument(skip(self, input), fields(request_id = %input.request_id))]
    async fn analyze_label(&self, input: AnalyzeLabelInput) -> Result<LabelAnalysis, CoreError> {
        // 1. Require an image before touching the model
        let image = input.image.ok_or(CoreError::MissingImage)?;

        // 2. Bound the upload size; decoding is CPU bound
        let max_edge = self.max_image_edge;
        let image = tokio::task::spawn_blocking(move || normalize_image(image, max_edge))
            .await
            .map_err(|e| {
                error!("Image normalization task failed: {}", e);
                CoreError::InternalServerError
            })?;

        info!(
            filename = %image.filename,
            mime_type = %image.mime_type,
            bytes = image.len(),
            "Extracting ingredients from label"
        );

        // 3. Extract the ingredient text
        let ingredients = self
            .llm_client
            .generate_with_image(EXTRACTION_PROMPT.to_string(), image.bytes, image.mime_type)
            .await?;

        // 4. Match against the term list, degrading to an empty list
        let terms = match self.term_list_repository.load_terms().await {
            Ok(terms) => terms,
            Err(e) => {
                warn!("Term list unavailable, matching against an empty list: {}", e);
                TermList::default()
            }
        };
        let found_unhealthy = match_terms(&ingredients, &terms);

        info!(
            terms = terms.len(),
            matched = found_unhealthy.len(),
            "Ingredient matching done"
        );

        // 5. Ask for the health summary
        let analysis = self
            .llm_client
            .generate_with_text(analysis_prompt(&ingredients, &found_unhealthy))
            .await?;

        Ok(LabelAnalysis {
            ingredients,
            analysis,
            found_unhealthy,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Mutex};

    use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
    use uuid::Uuid;

    use super::*;
    use crate::domain::photo::entities::ImageBlob;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Image { prompt: String, image_data: Vec<u8>, mime_type: String },
        Text { prompt: String },
    }

    struct FakeLLM {
        extraction: Result<String, CoreError>,
        analysis: Result<String, CoreError>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeLLM {
        fn new(extraction: Result<String, CoreError>, analysis: Result<String, CoreError>) -> Self {
            Self {
                extraction,
                analysis,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl LLMClient for FakeLLM {
        async fn generate_with_image(
            &self,
            prompt: String,
            image_data: Vec<u8>,
            mime_type: String,
        ) -> Result<String, CoreError> {
            self.calls.lock().unwrap().push(Call::Image {
                prompt,
                image_data,
                mime_type,
            });
            self.extraction.clone()
        }

        async fn generate_with_text(&self, prompt: String) -> Result<String, CoreError> {
            self.calls.lock().unwrap().push(Call::Text { prompt });
            self.analysis.clone()
        }
    }

    struct FakeTerms(Result<TermList, CoreError>);

    impl TermListRepository for FakeTerms {
        async fn load_terms(&self) -> Result<TermList, CoreError> {
            self.0.clone()
        }
    }

    fn service(llm: FakeLLM, terms: FakeTerms) -> Service<FakeLLM, FakeTerms> {
        Service::new(llm, terms, 800)
    }

    fn png(width: u32, height: u32) -> ImageBlob {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([1, 2, 3])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        ImageBlob::new(buf, "image/png", "label.png")
    }

    fn input(image: Option<ImageBlob>) -> AnalyzeLabelInput {
        AnalyzeLabelInput {
            request_id: Uuid::nil(),
            image,
        }
    }

    #[tokio::test]
    async fn returns_ingredients_analysis_and_matches() {
        let svc = service(
            FakeLLM::new(
                Ok("Ingredients: Water, Sugar, Salt".to_string()),
                Ok("**Sugar**\nAdds empty calories.".to_string()),
            ),
            FakeTerms(Ok(TermList::from_iter(["sugar", "msg"]))),
        );

        let result = svc.analyze_label(input(Some(png(20, 10)))).await.unwrap();

        assert_eq!(result.ingredients, "Ingredients: Water, Sugar, Salt");
        assert_eq!(result.analysis, "**Sugar**\nAdds empty calories.");
        assert_eq!(result.found_unhealthy.as_slice(), ["sugar"]);

        let calls = svc.llm_client.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::Image {
                prompt, mime_type, ..
            } => {
                assert_eq!(prompt, EXTRACTION_PROMPT);
                assert_eq!(mime_type, "image/png");
            }
            other => panic!("expected image call first, got {other:?}"),
        }
        match &calls[1] {
            Call::Text { prompt } => {
                assert!(prompt.contains("Ingredients: Water, Sugar, Salt"));
                assert!(prompt.contains("sugar"));
            }
            other => panic!("expected text call second, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_image_fails_before_any_model_call() {
        let svc = service(
            FakeLLM::new(Ok(String::new()), Ok(String::new())),
            FakeTerms(Ok(TermList::default())),
        );

        let err = svc.analyze_label(input(None)).await.unwrap_err();

        assert_eq!(err, CoreError::MissingImage);
        assert!(svc.llm_client.calls().is_empty());
    }

    #[tokio::test]
    async fn extraction_failure_stops_the_pipeline() {
        let svc = service(
            FakeLLM::new(
                Err(CoreError::ExternalServiceError("quota exceeded".to_string())),
                Ok("unused".to_string()),
            ),
            FakeTerms(Ok(TermList::from_iter(["sugar"]))),
        );

        let err = svc.analyze_label(input(Some(png(4, 4)))).await.unwrap_err();

        assert_eq!(
            err,
            CoreError::ExternalServiceError("quota exceeded".to_string())
        );
        assert_eq!(svc.llm_client.calls().len(), 1);
    }

    #[tokio::test]
    async fn analysis_failure_is_propagated() {
        let svc = service(
            FakeLLM::new(
                Ok("sugar".to_string()),
                Err(CoreError::ExternalServiceError("timeout".to_string())),
            ),
            FakeTerms(Ok(TermList::from_iter(["sugar"]))),
        );

        let err = svc.analyze_label(input(Some(png(4, 4)))).await.unwrap_err();

        assert!(matches!(err, CoreError::ExternalServiceError(_)));
        assert_eq!(svc.llm_client.calls().len(), 2);
    }

    #[tokio::test]
    async fn unreadable_term_list_degrades_to_no_matches() {
        let svc = service(
            FakeLLM::new(Ok("sugar, msg".to_string()), Ok("fine".to_string())),
            FakeTerms(Err(CoreError::ResourceLoadError("missing".to_string()))),
        );

        let result = svc.analyze_label(input(Some(png(4, 4)))).await.unwrap();

        assert!(result.found_unhealthy.is_empty());
        assert_eq!(result.analysis, "fine");
    }

    #[tokio::test]
    async fn oversized_image_is_downsampled_before_upload() {
        let svc = service(
            FakeLLM::new(Ok("water".to_string()), Ok("ok".to_string())),
            FakeTerms(Ok(TermList::default())),
        );

        svc.analyze_label(input(Some(png(2000, 1000)))).await.unwrap();

        let calls = svc.llm_client.calls();
        let Call::Image { image_data, .. } = &calls[0] else {
            panic!("expected image call first");
        };
        let sent = image::load_from_memory(image_data).unwrap();
        assert_eq!(sent.dimensions(), (800, 400));
    }

    #[tokio::test]
    async fn term_list_is_read_fresh_for_every_request() {
        use crate::domain::ingredient::ports::MockTermListRepository;

        let mut terms = MockTermListRepository::new();
        terms
            .expect_load_terms()
            .times(2)
            .returning(|| Box::pin(async { Ok(TermList::parse("salt\n")) }));

        let svc = Service::new(
            FakeLLM::new(Ok("Water, Salt".to_string()), Ok("Fine.".to_string())),
            terms,
            800,
        );

        for _ in 0..2 {
            let result = svc.analyze_label(input(Some(png(4, 4)))).await.unwrap();
            assert_eq!(result.found_unhealthy.as_slice(), ["salt"]);
        }
    }
}
