#[cfg(test)]
mod tests {
    use crate::expression::{classify_expression, ExpressionThresholds};
    use crate::features::{FaceFeatures, HandFeatures};
    use crate::gesture::{classify_gesture, GestureThresholds};
    use crate::schema;
    use crate::types::{Expression, Gesture, Handedness, KeypointSet, Point3D};

    const FRAME_W: u32 = 640;
    const FRAME_H: u32 = 480;

    fn pt(x: f32, y: f32) -> Point3D {
        Point3D { x, y, z: 0.0 }
    }

    /// Face with every point at the frame center, then the listed indices
    /// moved. With 640x480 frames the pixel thresholds work out in tenths
    /// of normalized units.
    fn face_with(overrides: &[(usize, f32, f32)]) -> KeypointSet {
        let mut points = vec![pt(0.5, 0.5); schema::FACE_POINT_COUNT];
        for &(i, x, y) in overrides {
            points[i] = pt(x, y);
        }
        KeypointSet::new(points)
    }

    /// Curled fist baseline: every tip level with its mid joint, wrist below.
    fn hand_with(overrides: &[(usize, f32, f32)]) -> KeypointSet {
        let mut points = vec![pt(0.5, 0.6); schema::HAND_POINT_COUNT];
        points[schema::WRIST] = pt(0.5, 0.8);
        for &(i, x, y) in overrides {
            points[i] = pt(x, y);
        }
        KeypointSet::new(points)
    }

    fn smiling_face() -> KeypointSet {
        // Open mouth (24 px gap over 64 px width -> ratio 0.375) with the
        // corners curled above the lower lip.
        face_with(&[
            (schema::UPPER_LIP, 0.5, 0.50),
            (schema::LOWER_LIP, 0.5, 0.55),
            (schema::MOUTH_INNER_LEFT, 0.55, 0.52),
            (schema::MOUTH_INNER_RIGHT, 0.45, 0.52),
            (schema::MOUTH_CORNER_LEFT, 0.56, 0.53),
            (schema::MOUTH_CORNER_RIGHT, 0.44, 0.53),
        ])
    }

    fn surprised_face() -> KeypointSet {
        // Wide-open mouth (ratio 0.6), corners hanging below the lower lip,
        // both eyebrows 38 px above the baseline.
        face_with(&[
            (schema::UPPER_LIP, 0.5, 0.50),
            (schema::LOWER_LIP, 0.5, 0.58),
            (schema::MOUTH_INNER_LEFT, 0.55, 0.54),
            (schema::MOUTH_INNER_RIGHT, 0.45, 0.54),
            (schema::MOUTH_CORNER_LEFT, 0.56, 0.60),
            (schema::MOUTH_CORNER_RIGHT, 0.44, 0.60),
            (schema::LEFT_EYEBROW_MID, 0.45, 0.42),
            (schema::RIGHT_EYEBROW_MID, 0.55, 0.42),
        ])
    }

    fn angry_face() -> KeypointSet {
        // Closed mouth, both eyebrows ~10 px below the baseline.
        face_with(&[
            (schema::LEFT_EYEBROW_MID, 0.45, 0.52),
            (schema::RIGHT_EYEBROW_MID, 0.55, 0.52),
        ])
    }

    fn extract_face(set: &KeypointSet) -> FaceFeatures {
        FaceFeatures::extract(set, FRAME_W, FRAME_H).unwrap()
    }

    // =========================================================================
    // Expression rules
    // =========================================================================

    #[test]
    fn smile_is_detected() {
        let f = extract_face(&smiling_face());
        assert!(f.mouth_aspect_ratio > 0.2);
        assert_eq!(
            classify_expression(&f, &ExpressionThresholds::default()),
            Some(Expression::Smile)
        );
        assert_eq!(Expression::Smile.as_str(), "SOURIRE");
    }

    #[test]
    fn surprise_is_detected() {
        let f = extract_face(&surprised_face());
        assert!(f.left_eyebrow_raise > 25.0 && f.right_eyebrow_raise > 25.0);
        assert_eq!(
            classify_expression(&f, &ExpressionThresholds::default()),
            Some(Expression::Surprise)
        );
    }

    #[test]
    fn anger_is_detected() {
        let f = extract_face(&angry_face());
        assert!(f.left_eyebrow_raise < -5.0 && f.right_eyebrow_raise < -5.0);
        assert_eq!(
            classify_expression(&f, &ExpressionThresholds::default()),
            Some(Expression::Angry)
        );
    }

    #[test]
    fn neutral_face_has_no_label() {
        let f = extract_face(&face_with(&[]));
        assert_eq!(classify_expression(&f, &ExpressionThresholds::default()), None);
    }

    #[test]
    fn smile_wins_over_surprise() {
        // Satisfies the surprise conditions AND the smile conditions: mouth
        // wide open, eyebrows high, but corners curled above the lower lip.
        // Rule order must pick the smile.
        let set = face_with(&[
            (schema::UPPER_LIP, 0.5, 0.50),
            (schema::LOWER_LIP, 0.5, 0.58),
            (schema::MOUTH_INNER_LEFT, 0.55, 0.54),
            (schema::MOUTH_INNER_RIGHT, 0.45, 0.54),
            (schema::MOUTH_CORNER_LEFT, 0.56, 0.52),
            (schema::MOUTH_CORNER_RIGHT, 0.44, 0.52),
            (schema::LEFT_EYEBROW_MID, 0.45, 0.42),
            (schema::RIGHT_EYEBROW_MID, 0.55, 0.42),
        ]);
        let f = extract_face(&set);
        assert!(f.mouth_aspect_ratio > 0.5, "precondition: surprise mouth holds");
        assert!(
            f.left_eyebrow_raise > 25.0 && f.right_eyebrow_raise > 25.0,
            "precondition: surprise eyebrows hold"
        );
        assert_eq!(
            classify_expression(&f, &ExpressionThresholds::default()),
            Some(Expression::Smile)
        );
    }

    #[test]
    fn expression_classification_is_deterministic() {
        for set in [smiling_face(), surprised_face(), angry_face(), face_with(&[])] {
            let a = classify_expression(&extract_face(&set), &ExpressionThresholds::default());
            let b = classify_expression(&extract_face(&set), &ExpressionThresholds::default());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn thresholds_are_overridable() {
        let strict = ExpressionThresholds {
            smile_mouth_ratio: 0.9,
            ..ExpressionThresholds::default()
        };
        let f = extract_face(&smiling_face());
        assert_eq!(classify_expression(&f, &strict), None);
    }

    // =========================================================================
    // Gesture rules
    // =========================================================================

    fn ok_hand() -> KeypointSet {
        // Thumb and index pinched (distance 0.02), other three fingers up.
        hand_with(&[
            (schema::THUMB_TIP, 0.50, 0.50),
            (schema::INDEX_TIP, 0.52, 0.50),
            (schema::MIDDLE_TIP, 0.55, 0.40),
            (schema::MIDDLE_PIP, 0.55, 0.50),
            (schema::RING_TIP, 0.60, 0.40),
            (schema::RING_PIP, 0.60, 0.50),
            (schema::PINKY_TIP, 0.65, 0.40),
            (schema::PINKY_PIP, 0.65, 0.50),
        ])
    }

    fn like_hand_right() -> KeypointSet {
        // Thumb up and pointing left of the wrist, fingers curled down.
        hand_with(&[
            (schema::THUMB_TIP, 0.40, 0.45),
            (schema::THUMB_IP, 0.42, 0.55),
            (schema::INDEX_TIP, 0.55, 0.65),
            (schema::INDEX_PIP, 0.55, 0.60),
            (schema::MIDDLE_TIP, 0.58, 0.65),
            (schema::MIDDLE_PIP, 0.58, 0.60),
            (schema::RING_TIP, 0.61, 0.65),
            (schema::RING_PIP, 0.61, 0.60),
            (schema::PINKY_TIP, 0.64, 0.65),
            (schema::PINKY_PIP, 0.64, 0.60),
        ])
    }

    fn mirrored(set: &KeypointSet) -> KeypointSet {
        KeypointSet::new(
            set.points
                .iter()
                .map(|p| Point3D { x: 1.0 - p.x, y: p.y, z: p.z })
                .collect(),
        )
    }

    fn classify(set: &KeypointSet, handedness: Handedness) -> Option<Gesture> {
        let f = HandFeatures::extract(set).unwrap();
        classify_gesture(&f, handedness, &GestureThresholds::default())
    }

    #[test]
    fn ok_sign_is_detected() {
        assert_eq!(classify(&ok_hand(), Handedness::Right), Some(Gesture::Ok));
        // The pinch rule ignores handedness.
        assert_eq!(classify(&ok_hand(), Handedness::Left), Some(Gesture::Ok));
    }

    #[test]
    fn thumbs_up_is_detected() {
        assert_eq!(
            classify(&like_hand_right(), Handedness::Right),
            Some(Gesture::Like)
        );
    }

    #[test]
    fn thumbs_up_survives_mirroring() {
        // The same pose mirrored across the x axis with flipped handedness
        // must classify identically.
        let flipped = mirrored(&like_hand_right());
        assert_eq!(classify(&flipped, Handedness::Left), Some(Gesture::Like));
        // And the wrong handedness for the pose yields nothing.
        assert_eq!(classify(&flipped, Handedness::Right), None);
    }

    #[test]
    fn heart_is_detected() {
        let set = hand_with(&[
            (schema::THUMB_TIP, 0.45, 0.40),
            (schema::THUMB_IP, 0.45, 0.50),
            (schema::INDEX_TIP, 0.60, 0.40),
            (schema::INDEX_PIP, 0.60, 0.50),
            (schema::MIDDLE_TIP, 0.58, 0.65),
            (schema::MIDDLE_PIP, 0.58, 0.60),
            (schema::RING_TIP, 0.61, 0.65),
            (schema::RING_PIP, 0.61, 0.60),
            (schema::PINKY_TIP, 0.64, 0.65),
            (schema::PINKY_PIP, 0.64, 0.60),
        ]);
        let f = HandFeatures::extract(&set).unwrap();
        assert!((f.thumb_index_distance - 0.15).abs() < 1e-6);
        assert_eq!(classify(&set, Handedness::Right), Some(Gesture::Heart));
    }

    #[test]
    fn heart_distance_bounds_are_strict() {
        // Exactly 0.1 apart: not a heart, and the pinky is curled so it is
        // not "I love you" either.
        let set = hand_with(&[
            (schema::THUMB_TIP, 0.50, 0.40),
            (schema::THUMB_IP, 0.50, 0.50),
            (schema::INDEX_TIP, 0.60, 0.40),
            (schema::INDEX_PIP, 0.60, 0.50),
            (schema::MIDDLE_TIP, 0.58, 0.65),
            (schema::MIDDLE_PIP, 0.58, 0.60),
            (schema::RING_TIP, 0.61, 0.65),
            (schema::RING_PIP, 0.61, 0.60),
            (schema::PINKY_TIP, 0.64, 0.65),
            (schema::PINKY_PIP, 0.64, 0.60),
        ]);
        assert_eq!(classify(&set, Handedness::Right), None);
    }

    #[test]
    fn i_love_you_is_detected() {
        let set = hand_with(&[
            (schema::THUMB_TIP, 0.35, 0.40),
            (schema::THUMB_IP, 0.35, 0.50),
            (schema::INDEX_TIP, 0.65, 0.40),
            (schema::INDEX_PIP, 0.65, 0.50),
            (schema::MIDDLE_TIP, 0.58, 0.65),
            (schema::MIDDLE_PIP, 0.58, 0.60),
            (schema::RING_TIP, 0.61, 0.65),
            (schema::RING_PIP, 0.61, 0.60),
            (schema::PINKY_TIP, 0.75, 0.40),
            (schema::PINKY_PIP, 0.75, 0.50),
        ]);
        assert_eq!(classify(&set, Handedness::Right), Some(Gesture::ILoveYou));
        assert_eq!(Gesture::ILoveYou.as_str(), "I LOVE YOU");
    }

    #[test]
    fn fist_has_no_label() {
        assert_eq!(classify(&hand_with(&[]), Handedness::Right), None);
        assert_eq!(classify(&hand_with(&[]), Handedness::Left), None);
    }

    #[test]
    fn gesture_classification_is_deterministic() {
        let set = ok_hand();
        assert_eq!(
            classify(&set, Handedness::Right),
            classify(&set, Handedness::Right)
        );
    }
}
