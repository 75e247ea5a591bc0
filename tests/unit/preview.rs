use super::*;
use crate::batch::model::{FrameRgb, Mask};

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "mattebox_{}_{}_{}",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ))
}

#[test]
fn session_namer_zero_pads_frame_numbers() {
    let namer = SessionNamer::with_prefix("p");
    assert_eq!(namer.frame_name(3), "p_00003.png");
    assert_eq!(namer.mask_name(12), "p_mask_00012.png");
    assert!(SessionNamer::new().frame_name(0).starts_with("matte_edit_"));
}

#[test]
fn previews_are_written_and_mask_records_capped() {
    let dir = temp_dir("previews");
    let frames = FrameBatch::new(vec![
        FrameRgb::new(4, 4, vec![0.5; 48]).unwrap(),
        FrameRgb::new(4, 4, vec![0.25; 48]).unwrap(),
    ])
    .unwrap();
    let masks = MaskBatch::new(
        (0..4)
            .map(|_| Mask::new(4, 4, vec![1.0; 16]).unwrap())
            .collect(),
    )
    .unwrap();

    let artifacts =
        write_previews(&dir, &frames, Some(&masks), &SessionNamer::with_prefix("t")).unwrap();

    assert_eq!(artifacts.frames.len(), 2);
    assert_eq!(artifacts.masks.len(), 2); // capped at the frame count
    for record in artifacts.frames.iter().chain(artifacts.masks.iter()) {
        assert!(record.path.is_file(), "{} missing", record.path.display());
    }
    assert_eq!(artifacts.frames[1].filename, "t_00001.png");
    assert_eq!(artifacts.masks[0].filename, "t_mask_00000.png");

    let frame_png = image::open(&artifacts.frames[0].path).unwrap().to_rgb8();
    assert_eq!(frame_png.get_pixel(0, 0), &image::Rgb([127, 127, 127]));
    let mask_png = image::open(&artifacts.masks[0].path).unwrap().to_luma8();
    assert_eq!(mask_png.get_pixel(0, 0), &image::Luma([255]));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn no_base_masks_mean_no_mask_records() {
    let dir = temp_dir("no_masks");
    let frames = FrameBatch::new(vec![FrameRgb::new(2, 2, vec![0.0; 12]).unwrap()]).unwrap();

    let artifacts =
        write_previews(&dir, &frames, None, &SessionNamer::with_prefix("n")).unwrap();
    assert_eq!(artifacts.frames.len(), 1);
    assert!(artifacts.masks.is_empty());

    std::fs::remove_dir_all(&dir).unwrap();
}
