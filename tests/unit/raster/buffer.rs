//! Tests for the channel-first image buffer and its pixel transforms

#[cfg(test)]
mod tests {
    use cutwise::CutError;
    use cutwise::raster::Image;
    use cutwise::spatial::CutBounds;
    use ndarray::{Array2, Array3, array, s};

    /// 1-channel image whose pixel value encodes its position
    fn indexed(height: usize, width: usize) -> Image {
        let data = Array3::from_shape_fn((1, height, width), |(_, y, x)| (y * 10 + x) as f32);
        Image::new(data).expect("non-empty")
    }

    // Tests construction rejects every kind of empty buffer
    #[test]
    fn test_new_rejects_empty() {
        for shape in [(0, 2, 2), (3, 0, 2), (3, 2, 0)] {
            assert!(matches!(
                Image::new(Array3::zeros(shape)),
                Err(CutError::InvalidDimensions { .. })
            ));
        }
        let image = Image::filled(3, 4, 5, 0.5).expect("non-empty");
        assert_eq!(image.shape(), (3, 4, 5));
        assert_eq!((image.channels(), image.height(), image.width()), (3, 4, 5));
    }

    // Tests planes stack back into a channel-first image
    #[test]
    fn test_from_planes() {
        let planes = vec![Array2::zeros((2, 3)), Array2::ones((2, 3))];
        let image = Image::from_planes(&planes).expect("planes share a shape");
        assert_eq!(image.shape(), (2, 2, 3));
        assert_eq!(image.plane(1), Array2::<f32>::ones((2, 3)));

        assert!(Image::from_planes(&[]).is_err());
        let mismatched = vec![Array2::zeros((2, 3)), Array2::zeros((3, 2))];
        assert!(Image::from_planes(&mismatched).is_err());
    }

    // Tests a crop inside the image copies exactly the half-open window
    #[test]
    fn test_crop_inside() {
        let image = indexed(5, 6);
        let cut = image.crop(CutBounds::new(1, 4, 2, 4)).expect("window is non-empty");

        assert_eq!(cut.shape(), (1, 2, 3));
        assert_eq!(cut.plane(0), array![[21.0_f32, 22.0, 23.0], [31.0, 32.0, 33.0]]);
    }

    // Tests a crop past the edges zero-fills the outside
    // Verified by offsetting the destination by the clamped origin
    #[test]
    fn test_crop_zero_fills_outside() {
        let image = Image::filled(1, 3, 3, 1.0).expect("non-empty");
        let cut = image.crop(CutBounds::new(-2, 2, -1, 2)).expect("window is non-empty");

        assert_eq!(cut.shape(), (1, 3, 4));
        let expected = array![
            [0.0_f32, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0]
        ];
        assert_eq!(cut.plane(0), expected);

        let disjoint = image.crop(CutBounds::new(10, 12, 10, 12)).expect("window is non-empty");
        assert!(disjoint.view().iter().all(|&v| v == 0.0));
    }

    // Tests an empty or inverted window is rejected
    #[test]
    fn test_crop_rejects_empty_window() {
        let image = indexed(4, 4);
        assert!(image.crop(CutBounds::new(2, 2, 0, 4)).is_err());
        assert!(image.crop(CutBounds::new(0, 4, 3, 1)).is_err());
    }

    // Tests letterboxing pads the shorter axis evenly on both sides
    #[test]
    fn test_letterbox_wide() {
        let image = Image::filled(3, 2, 4, 1.0).expect("non-empty");
        let boxed = image.letterbox();

        assert_eq!(boxed.shape(), (3, 4, 4));
        let plane = boxed.plane(0);
        assert!(plane.row(0).iter().all(|&v| v == 0.0));
        assert!(plane.row(3).iter().all(|&v| v == 0.0));
        assert!(plane.slice(s![1..3, ..]).iter().all(|&v| v == 1.0));
    }

    // Tests letterboxing with an odd difference stays one pixel short of square
    #[test]
    fn test_letterbox_tall_odd() {
        let image = Image::filled(1, 5, 2, 1.0).expect("non-empty");
        let boxed = image.letterbox();

        assert_eq!(boxed.shape(), (1, 5, 4));
        assert!(boxed.plane(0).column(0).iter().all(|&v| v == 0.0));
        assert!(boxed.plane(0).column(1).iter().all(|&v| v == 1.0));

        let square = Image::filled(1, 3, 3, 1.0).expect("non-empty");
        assert_eq!(square.letterbox(), square);
    }

    // Tests padding grows every side and keeps the content centered
    #[test]
    fn test_pad() {
        let image = indexed(2, 3);
        let padded = image.pad(2);

        assert_eq!(padded.shape(), (1, 6, 7));
        assert_eq!(padded.plane(0).slice(s![2..4, 2..5]), image.plane(0));
        assert!((padded.view().sum() - image.view().sum()).abs() < 1e-6);
        assert_eq!(image.pad(0), image);
    }

    // Tests grayscale applies luma weights and broadcasts to every channel
    // Verified by averaging the channels instead
    #[test]
    fn test_grayscale_luma() {
        let mut data = Array3::<f32>::zeros((3, 1, 2));
        data[[0, 0, 0]] = 1.0;
        data[[1, 0, 1]] = 1.0;
        let gray = Image::new(data).expect("non-empty").grayscale();

        for channel in 0..3 {
            let plane = gray.plane(channel);
            assert!((plane[[0, 0]] - 0.2989).abs() < 1e-6);
            assert!((plane[[0, 1]] - 0.587).abs() < 1e-6);
        }
    }

    // Tests non-RGB images fall back to the channel mean
    #[test]
    fn test_grayscale_other_channel_counts() {
        let data = Array3::from_shape_vec((2, 1, 1), vec![0.2, 0.6]).expect("shape matches");
        let gray = Image::new(data).expect("non-empty").grayscale();
        assert!(gray.view().iter().all(|&v| (v - 0.4).abs() < 1e-6));
    }

    // Tests flipping mirrors columns and is its own inverse
    #[test]
    fn test_flip_horizontal() {
        let image = indexed(2, 3);
        let flipped = image.flip_horizontal();

        assert_eq!(flipped.plane(0), array![[2.0_f32, 1.0, 0.0], [12.0, 11.0, 10.0]]);
        assert_eq!(flipped.flip_horizontal(), image);
    }

    // Tests the mutable handle writes through and the array can be taken back
    #[test]
    fn test_data_access() {
        let mut image = Image::filled(1, 2, 2, 0.0).expect("non-empty");
        image.data_mut().fill(3.0);
        let data = image.into_array();
        assert!(data.iter().all(|&v| v == 3.0));
    }
}
