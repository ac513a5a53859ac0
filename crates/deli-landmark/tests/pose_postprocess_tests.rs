use deli_base::Tensor;
use deli_landmark::LandmarkError;
use deli_landmark::pose::{
    Landmark, LetterboxPadding, Mode, ModeLayout, Roi, decode_landmarks, gate, partition,
    presence_score, project_landmarks, remove_letterbox, sigmoid, split_output,
};
use std::f32::consts::PI;

fn landmark(x: f32, y: f32, z: f32) -> Landmark {
    Landmark {
        x,
        y,
        z,
        visibility: 0.7,
        presence: 0.8,
    }
}

fn numbered_landmarks(count: usize) -> Vec<Landmark> {
    (0..count).map(|i| landmark(i as f32, 0.0, 0.0)).collect()
}

// -- split --

#[test]
fn test_split_full_body_output() {
    let data: Vec<f32> = (0..176).map(|i| i as f32).collect();
    let (payload, flag) = split_output(Tensor::from_vec(data), &ModeLayout::FULL_BODY).unwrap();
    assert_eq!(payload.len(), 175);
    assert_eq!(payload.data[174], 174.0);
    assert_eq!(flag.data, vec![175.0]);
}

#[test]
fn test_split_accepts_batched_shape() {
    let output = Tensor::new(vec![1, 136], vec![0.0; 136]).unwrap();
    let (payload, flag) = split_output(output, &ModeLayout::UPPER_BODY).unwrap();
    assert_eq!(payload.len(), 135);
    assert_eq!(flag.len(), 1);
}

#[test]
fn test_split_rejects_other_mode_length() {
    let output = Tensor::from_vec(vec![0.0; 136]);
    let result = split_output(output, &Mode::FullBody.layout());
    assert!(matches!(result, Err(LandmarkError::ShapeMismatch { .. })));
}

#[test]
fn test_split_rejects_off_by_one() {
    for len in [0, 175, 177] {
        let result = split_output(Tensor::from_vec(vec![0.0; len]), &ModeLayout::FULL_BODY);
        assert!(result.is_err(), "length {len} should be rejected");
    }
}

// -- presence --

#[test]
fn test_sigmoid_values() {
    assert_eq!(sigmoid(0.0), 0.5);
    assert!(sigmoid(10.0) > 0.9999);
    assert!(sigmoid(-10.0) < 0.0001);
    assert!(sigmoid(-10.0) > 0.0);
    assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-6);
}

#[test]
fn test_sigmoid_extreme_inputs_stay_finite() {
    assert_eq!(sigmoid(-1000.0), 0.0);
    assert_eq!(sigmoid(1000.0), 1.0);
}

#[test]
fn test_presence_score_single_value() {
    let score = presence_score(&Tensor::from_vec(vec![10.0])).unwrap();
    assert!((score - 0.9999546).abs() < 1e-6);
}

#[test]
fn test_presence_score_rejects_wrong_length() {
    let result = presence_score(&Tensor::from_vec(vec![1.0, 2.0]));
    assert!(matches!(result, Err(LandmarkError::ShapeMismatch { .. })));
    assert!(presence_score(&Tensor::from_vec(vec![])).is_err());
}

#[test]
fn test_gate_threshold_is_inclusive() {
    let payload = Tensor::from_vec(vec![1.0, 2.0]);
    assert!(gate(payload.clone(), 0.5, 0.5).is_some());
    assert!(gate(payload.clone(), 0.49, 0.5).is_none());
    assert_eq!(gate(payload, 0.9, 0.5).unwrap().data, vec![1.0, 2.0]);
}

#[test]
fn test_gate_zero_threshold_always_passes() {
    let payload = Tensor::from_vec(vec![0.0]);
    assert!(gate(payload, sigmoid(-1000.0), 0.0).is_some());
}

// -- decode --

#[test]
fn test_decode_scales_by_tensor_size() {
    let payload = Tensor::from_vec(vec![128.0, 64.0, -32.0, 0.0, 10.0]);
    let landmarks = decode_landmarks(&payload, 1, 256).unwrap();
    assert_eq!(landmarks.len(), 1);
    assert_eq!(landmarks[0].x, 0.5);
    assert_eq!(landmarks[0].y, 0.25);
    assert_eq!(landmarks[0].z, -0.125);
    assert_eq!(landmarks[0].visibility, 0.5);
    assert!(landmarks[0].presence > 0.9999);
}

#[test]
fn test_decode_keeps_record_order() {
    let data: Vec<f32> = (0..35)
        .flat_map(|i| [i as f32, 0.0, 0.0, 0.0, 0.0])
        .collect();
    let landmarks = decode_landmarks(&Tensor::from_vec(data), 35, 1).unwrap();
    for (i, landmark) in landmarks.iter().enumerate() {
        assert_eq!(landmark.x, i as f32);
    }
}

#[test]
fn test_decode_rejects_wrong_length() {
    let result = decode_landmarks(&Tensor::from_vec(vec![0.0; 134]), 27, 256);
    assert!(matches!(result, Err(LandmarkError::ShapeMismatch { .. })));
}

// -- letterbox --

#[test]
fn test_remove_letterbox_without_padding_is_identity() {
    let input = vec![landmark(0.1, 0.9, 0.3), landmark(0.5, 0.5, -0.2)];
    let output = remove_letterbox(input.clone(), &LetterboxPadding::none());
    assert_eq!(output, input);
}

#[test]
fn test_remove_letterbox_horizontal_padding() {
    let padding = LetterboxPadding::fit(32.0, 64.0);
    let input = vec![
        landmark(0.25, 0.5, 0.1),
        landmark(0.75, 0.2, 0.0),
        landmark(0.5, 1.0, -0.05),
    ];
    let output = remove_letterbox(input, &padding);

    assert_eq!(output[0].x, 0.0);
    assert_eq!(output[0].y, 0.5);
    assert!((output[0].z - 0.2).abs() < 1e-6);
    assert_eq!(output[1].x, 1.0);
    assert_eq!(output[2].x, 0.5);
    assert_eq!(output[2].y, 1.0);
    assert!((output[2].z + 0.1).abs() < 1e-6);
}

#[test]
fn test_remove_letterbox_vertical_padding_keeps_z() {
    let padding = LetterboxPadding::fit(64.0, 32.0);
    let output = remove_letterbox(vec![landmark(0.3, 0.25, 0.4)], &padding);
    assert_eq!(output[0].x, 0.3);
    assert_eq!(output[0].y, 0.0);
    assert_eq!(output[0].z, 0.4);
}

#[test]
fn test_remove_letterbox_keeps_points_in_padding() {
    let padding = LetterboxPadding::fit(32.0, 64.0);
    let output = remove_letterbox(vec![landmark(0.0, 0.5, 0.0)], &padding);
    assert!((output[0].x + 0.5).abs() < 1e-6);
}

#[test]
fn test_remove_letterbox_keeps_scores() {
    let padding = LetterboxPadding::fit(10.0, 30.0);
    let output = remove_letterbox(vec![landmark(0.4, 0.4, 0.0)], &padding);
    assert_eq!(output[0].visibility, 0.7);
    assert_eq!(output[0].presence, 0.8);
}

// -- projection --

#[test]
fn test_project_full_image_roi_is_identity() {
    let input = vec![landmark(0.1, 0.2, 0.3), landmark(0.9, 0.6, -0.1)];
    let output = project_landmarks(input.clone(), &Roi::full_image());
    for (a, b) in output.iter().zip(input.iter()) {
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.y - b.y).abs() < 1e-6);
        assert_eq!(a.z, b.z);
    }
}

#[test]
fn test_project_scales_and_translates() {
    let roi = Roi::new(0.4, 0.6, 0.5, 0.25, 0.0);
    let output = project_landmarks(vec![landmark(0.0, 0.0, 0.2)], &roi);
    assert!((output[0].x - 0.15).abs() < 1e-6);
    assert!((output[0].y - 0.475).abs() < 1e-6);
    assert!((output[0].z - 0.1).abs() < 1e-6);
}

#[test]
fn test_project_center_lands_on_roi_center() {
    for step in 0..16 {
        let rotation = step as f32 * PI / 8.0;
        let roi = Roi::new(0.7, 0.2, 0.3, 0.6, rotation);
        let output = project_landmarks(vec![landmark(0.5, 0.5, 0.0)], &roi);
        assert!((output[0].x - 0.7).abs() < 1e-6);
        assert!((output[0].y - 0.2).abs() < 1e-6);
    }
}

#[test]
fn test_project_half_turn_mirrors_about_center() {
    let roi = Roi::new(0.5, 0.5, 1.0, 1.0, PI);
    let output = project_landmarks(vec![landmark(0.2, 0.1, 0.0)], &roi);
    assert!((output[0].x - 0.8).abs() < 1e-5);
    assert!((output[0].y - 0.9).abs() < 1e-5);
}

#[test]
fn test_project_inverts_to_local() {
    let roi = Roi::new(0.45, 0.55, 0.35, 0.5, 1.1);
    let input: Vec<Landmark> = (0..9)
        .map(|i| landmark((i % 3) as f32 * 0.5, (i / 3) as f32 * 0.5, 0.0))
        .collect();
    let output = project_landmarks(input.clone(), &roi);
    for (projected, original) in output.iter().zip(input.iter()) {
        let local = roi.to_local(projected.position());
        assert!((local.x - original.x).abs() < 1e-5);
        assert!((local.y - original.y).abs() < 1e-5);
    }
}

// -- partition --

#[test]
fn test_partition_full_body() {
    let (primary, auxiliary) = partition(numbered_landmarks(35), &ModeLayout::FULL_BODY).unwrap();
    assert_eq!(primary.len(), 33);
    assert_eq!(auxiliary.len(), 2);
    assert_eq!(primary[32].x, 32.0);
    assert_eq!(auxiliary[0].x, 33.0);
    assert_eq!(auxiliary[1].x, 34.0);
}

#[test]
fn test_partition_upper_body() {
    let (primary, auxiliary) = partition(numbered_landmarks(27), &ModeLayout::UPPER_BODY).unwrap();
    assert_eq!(primary.len(), 25);
    assert_eq!(auxiliary.len(), 2);
    assert_eq!(auxiliary[0].x, 25.0);
}

#[test]
fn test_partition_concatenation_restores_input() {
    let input = numbered_landmarks(35);
    let (mut primary, auxiliary) = partition(input.clone(), &ModeLayout::FULL_BODY).unwrap();
    primary.extend(auxiliary);
    assert_eq!(primary, input);
}

#[test]
fn test_partition_rejects_wrong_count() {
    let result = partition(numbered_landmarks(27), &ModeLayout::FULL_BODY);
    assert!(matches!(result, Err(LandmarkError::ShapeMismatch { .. })));
}
