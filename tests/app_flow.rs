use async_trait::async_trait;
use babygen::{
    grid, App, Command, Config, GenerationError, GenerationProgress, Generator, ImageBackend,
    InferenceRequest, Outcome, Phase,
};
use image::{DynamicImage, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses and records every request it receives.
#[derive(Clone, Default)]
struct MockImageService {
    responses: Arc<Mutex<VecDeque<babygen::Result<Vec<u8>>>>>,
    requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockImageService {
    fn push_image(&self, color: [u8; 3]) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(48, 64, Rgb(color)));
        let png = grid::encode_png(&img).unwrap();
        self.responses.lock().unwrap().push_back(Ok(png));
    }

    fn push_error(&self, status: u16, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(GenerationError::RemoteError {
                status,
                message: message.to_string(),
            }));
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageBackend for MockImageService {
    async fn generate(
        &self,
        _credential: &str,
        request: &InferenceRequest,
    ) -> babygen::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::RequestError("no response queued".into())))
    }

    fn endpoint(&self) -> &str {
        "mock://image-service"
    }
}

fn app_with(config: Config, service: &MockImageService) -> App<MockImageService> {
    let generator =
        Generator::new(service.clone(), &config).with_rng(StdRng::seed_from_u64(11));
    App::new(config, generator)
}

async fn run(app: &mut App<MockImageService>, line: &str) -> babygen::Result<Outcome> {
    let command = Command::parse(line)?;
    app.handle(command, |_| {}).await
}

#[tokio::test]
async fn single_then_save() {
    let out = tempfile::tempdir().unwrap();
    let service = MockImageService::default();
    service.push_image([120, 80, 60]);
    let mut app = app_with(Config::new().with_output_dir(out.path()), &service);

    run(&mut app, "gender girl").await.unwrap();
    run(&mut app, "skin light").await.unwrap();
    run(&mut app, "age teen").await.unwrap();
    run(&mut app, "key hf_test").await.unwrap();

    let outcome = run(&mut app, "single").await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Generated {
            caption: "Result: girl - Teen".into(),
            file_name: "result_girl_teen.png".into(),
        }
    );

    let saved = match run(&mut app, "save").await.unwrap() {
        Outcome::Saved(path) => path,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(saved, out.path().join("result_girl_teen.png"));

    let decoded = image::open(&saved).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (48, 64));
}

#[tokio::test]
async fn generation_is_blocked_without_key() {
    let service = MockImageService::default();
    service.push_image([0, 0, 0]);
    let mut app = app_with(Config::new(), &service);

    assert_eq!(app.blockers().len(), 1);
    let err = run(&mut app, "all").await.unwrap_err();
    assert!(matches!(err, GenerationError::ConfigError(_)));
    assert_eq!(service.request_count(), 0);

    let err = run(&mut app, "save").await.unwrap_err();
    assert!(matches!(err, GenerationError::NothingToSave));
}

#[tokio::test]
async fn configured_token_and_photo_gate() {
    let dir = tempfile::tempdir().unwrap();
    let photo = dir.path().join("parent.jpg");
    RgbImage::from_pixel(16, 16, Rgb([200, 150, 100]))
        .save(&photo)
        .unwrap();

    let service = MockImageService::default();
    service.push_image([1, 2, 3]);
    let config = Config::new()
        .with_api_token("hf_env")
        .with_parent_photos_required(true);
    let mut app = app_with(config, &service);

    assert_eq!(app.blockers().len(), 1);
    assert!(run(&mut app, "single").await.is_err());

    run(&mut app, &format!("photo 1 {}", photo.display()))
        .await
        .unwrap();
    run(&mut app, &format!("photo 2 {}", photo.display()))
        .await
        .unwrap();
    assert!(app.blockers().is_empty());

    let outcome = run(&mut app, "single").await.unwrap();
    assert!(matches!(outcome, Outcome::Generated { .. }));
    assert_eq!(service.request_count(), 1);
}

#[tokio::test]
async fn all_phases_grid_and_progress() {
    let service = MockImageService::default();
    for color in [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0]] {
        service.push_image(color);
    }
    let mut app = app_with(Config::new().with_api_token("hf"), &service);
    run(&mut app, "gender boy").await.unwrap();

    let mut started = Vec::new();
    let outcome = app
        .handle(Command::GenerateAll, |event| {
            if let GenerationProgress::PhaseStarted { phase, .. } = event {
                started.push(phase);
            }
        })
        .await
        .unwrap();

    assert_eq!(started, Phase::ALL.to_vec());
    assert_eq!(
        outcome,
        Outcome::Generated {
            caption: "Age progression - boy".into(),
            file_name: "age_progression_boy.png".into(),
        }
    );

    let artifact = app.session().last_artifact().unwrap();
    let grid = image::load_from_memory(&artifact.png).unwrap().to_rgb8();
    assert_eq!(grid.dimensions(), (1024, 1024));
    assert_eq!(grid.get_pixel(700, 700), &Rgb([255, 255, 0]));
}

#[tokio::test]
async fn failed_run_keeps_earlier_result() {
    let service = MockImageService::default();
    service.push_image([9, 9, 9]);
    service.push_image([1, 1, 1]);
    service.push_image([2, 2, 2]);
    service.push_error(403, "Access to model is restricted");
    let mut app = app_with(Config::new().with_api_token("hf"), &service);
    run(&mut app, "gender boy").await.unwrap();
    run(&mut app, "age baby").await.unwrap();

    run(&mut app, "single").await.unwrap();
    let err = run(&mut app, "all").await.unwrap_err();

    assert_eq!(err.failed_phase(), Some(Phase::Teen));
    assert!(err.hint().unwrap().contains("terms of use"));
    assert_eq!(service.request_count(), 4);
    assert_eq!(
        app.session().last_artifact().unwrap().file_name,
        "result_boy_baby.png"
    );
}
