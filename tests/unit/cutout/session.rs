//! Tests for the heatmap-owning sampling session

#[cfg(test)]
mod tests {
    use cutwise::CutError;
    use cutwise::cutout::{CutSession, Identity, SessionConfig, StepRequest};
    use cutwise::raster::Image;
    use cutwise::spatial::HeatmapConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(use_heatmap: bool) -> SessionConfig {
        SessionConfig {
            cut_size: 16,
            use_heatmap,
            skip_augment: true,
            ..SessionConfig::default()
        }
    }

    fn request(overview: usize, inner: usize) -> StepRequest {
        StepRequest {
            overview,
            inner,
            ..StepRequest::default()
        }
    }

    // Tests counts are scaled and floored by the multiplier
    // Verified by rounding instead of flooring
    #[test]
    fn test_scaled_counts() {
        let session = CutSession::new(SessionConfig {
            cut_count_multiplier: 0.5,
            ..config(false)
        })
        .expect("valid config");
        assert_eq!(session.scaled_counts(&request(3, 5)), (1, 2));
        assert_eq!(session.scaled_counts(&request(4, 0)), (2, 0));

        let unit = CutSession::new(config(false)).expect("valid config");
        assert_eq!(unit.scaled_counts(&request(4, 7)), (4, 7));
    }

    // Tests a request that scales to nothing falls back to two inner cuts
    #[test]
    fn test_empty_request_guard() {
        let session = CutSession::new(SessionConfig {
            cut_count_multiplier: 0.0,
            ..config(false)
        })
        .expect("valid config");
        assert_eq!(session.scaled_counts(&request(4, 8)), (0, 2));

        let unit = CutSession::new(config(false)).expect("valid config");
        assert_eq!(unit.scaled_counts(&request(0, 0)), (0, 2));
    }

    // Tests invalid session settings are rejected up front
    #[test]
    fn test_session_validation() {
        let negative = SessionConfig {
            cut_count_multiplier: -1.0,
            ..config(false)
        };
        assert!(matches!(
            CutSession::new(negative),
            Err(CutError::InvalidParameter { .. })
        ));

        let bad_heatmap = SessionConfig {
            heatmap: HeatmapConfig {
                overlap_penalty_coef: 2.0,
                ..HeatmapConfig::default()
            },
            ..config(true)
        };
        assert!(CutSession::new(bad_heatmap).is_err());
    }

    // Tests a session without a heatmap never creates one
    #[test]
    fn test_step_without_heatmap() {
        let image = Image::filled(3, 30, 40, 0.5).expect("non-empty");
        let mut session = CutSession::new(config(false)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(0);

        let batch = session
            .step(&image, &request(2, 3), Identity, &mut rng)
            .expect("step succeeds");
        assert_eq!(batch.len(), 5);
        assert!(session.heatmap().is_none());
        assert_eq!(session.steps(), 1);
    }

    // Tests the heatmap is created lazily, suppressed and decayed each step
    #[test]
    fn test_step_with_heatmap() {
        let image = Image::filled(3, 30, 40, 0.5).expect("non-empty");
        let mut session = CutSession::new(config(true)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(session.heatmap().is_none());

        session
            .step(&image, &request(0, 4), Identity, &mut rng)
            .expect("step succeeds");
        let heatmap = session.heatmap().expect("heatmap created on first step");
        assert_eq!((heatmap.side_x(), heatmap.side_y()), (40, 30));

        let floor = {
            let c = heatmap.config();
            c.decay_scale / (1.0 + c.decay_scale)
        };
        assert!(heatmap.weights().iter().any(|&w| w < 1.0 - 1e-9));
        assert!(heatmap.weights().iter().all(|&w| w >= floor - 1e-12));

        for _ in 0..3 {
            session
                .step(&image, &request(0, 4), Identity, &mut rng)
                .expect("step succeeds");
        }
        assert_eq!(session.steps(), 4);
    }

    // Tests a new image size replaces the heatmap
    #[test]
    fn test_heatmap_follows_image_size() {
        let mut session = CutSession::new(config(true)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(2);

        let small = Image::filled(3, 20, 20, 0.1).expect("non-empty");
        session
            .step(&small, &request(0, 2), Identity, &mut rng)
            .expect("step succeeds");

        let wide = Image::filled(3, 20, 50, 0.1).expect("non-empty");
        session
            .step(&wide, &request(0, 2), Identity, &mut rng)
            .expect("step succeeds");

        let heatmap = session.heatmap().expect("heatmap exists");
        assert_eq!((heatmap.side_x(), heatmap.side_y()), (50, 20));
    }

    // Tests a step whose counts scale to zero still produces inner cuts
    #[test]
    fn test_step_never_empty() {
        let image = Image::filled(3, 24, 24, 0.3).expect("non-empty");
        let mut session = CutSession::new(config(false)).expect("valid config");
        let mut rng = StdRng::seed_from_u64(3);

        let batch = session
            .step(&image, &request(0, 0), Identity, &mut rng)
            .expect("step succeeds");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.overview_len(), 0);
    }
}
