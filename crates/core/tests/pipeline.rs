use std::collections::BTreeMap;
use talk_review_core::capture::{Capture, InMemoryCapture};
use talk_review_core::config::AnalysisConfig;
use talk_review_core::emotion::FrameObservation;
use talk_review_core::transcript::TechDomain;
use talk_review_core::voice::VoiceSignals;
use talk_review_core::{analyze, Pipeline};

const SAMPLE_RATE: u32 = 8_000;

fn frame(happy: f64, smiling: bool, eye_contact: bool) -> FrameObservation {
    FrameObservation {
        face_detected: true,
        emotion_distribution: BTreeMap::from([
            ("happy".to_owned(), happy),
            ("neutral".to_owned(), 1.0 - happy),
        ]),
        is_smiling: smiling,
        eye_contact,
    }
}

// Tone, silence, tone.
fn speech_with_gap() -> Vec<f32> {
    let tone = |n: usize| {
        (0..n).map(|i| (i as f32 * 0.05).sin() * 0.8).collect::<Vec<f32>>()
    };
    let mut samples = tone(SAMPLE_RATE as usize);
    samples.extend(std::iter::repeat(0.0).take(SAMPLE_RATE as usize / 2));
    samples.extend(tone(SAMPLE_RATE as usize));
    samples
}

fn sample_capture() -> Capture {
    let transcript = "Today I will talk about deploying services to the cloud. \
        We package each microservice in a docker container. \
        Next, kubernetes handles scaling and deployment on aws. \
        In conclusion, containers keep infrastructure simple.";
    Capture {
        frames: vec![
            frame(0.6, true, true),
            frame(0.4, false, true),
            frame(0.5, true, false),
            FrameObservation::default(),
        ],
        voice: VoiceSignals {
            transcript: transcript.to_owned(),
            duration_secs: 14.0,
            pitch_hz: vec![150.0, 160.0, 0.0, 180.0, 140.0, 170.0],
            intensity_db: vec![60.0, 62.0, 61.0, 59.0, 60.0],
            samples: speech_with_gap(),
            sample_rate: SAMPLE_RATE,
        },
        transcript: None,
    }
}

#[tokio::test]
async fn pipeline_matches_synchronous_analysis() {
    let capture = sample_capture();
    let config = AnalysisConfig::default();
    let expected = analyze(
        &capture.frames,
        &capture.voice,
        capture.transcript_text(),
        &config,
    );

    let pipeline = Pipeline::new(InMemoryCapture::new(capture), config);
    let analysis = pipeline.run().await.expect("pipeline succeeds");

    assert_eq!(analysis, expected);
    assert_eq!(analysis.transcript.detected_domain, TechDomain::CloudComputing);
    assert!(analysis.emotion.face_detected);
    assert_eq!(analysis.emotion.faces_detected_count, 3);
    assert_eq!(analysis.voice.pause_count, 1);
}

#[tokio::test]
async fn empty_capture_still_produces_scores() {
    let pipeline = Pipeline::new(InMemoryCapture::default(), AnalysisConfig::default());
    let analysis = pipeline.run().await.expect("pipeline succeeds");

    assert_eq!(analysis.emotion.frame_count, 0);
    assert_eq!(analysis.emotion.confidence_score, 5.0);
    assert_eq!(analysis.voice.words_per_minute, 0.0);
    let s = analysis.scores;
    for score in [
        s.content_clarity,
        s.technical_vocabulary,
        s.delivery,
        s.confidence,
        s.engagement,
        s.overall,
    ] {
        assert!((0.0..=10.0).contains(&score));
    }
}

#[tokio::test]
async fn explicit_transcript_overrides_voice_transcript() {
    let mut capture = sample_capture();
    capture.transcript = Some(
        "Encryption and authentication stop phishing. A firewall blocks malware.".to_owned(),
    );
    let pipeline = Pipeline::new(InMemoryCapture::new(capture), AnalysisConfig::default());
    let analysis = pipeline.run().await.expect("pipeline succeeds");
    assert_eq!(analysis.transcript.detected_domain, TechDomain::Cybersecurity);
}
