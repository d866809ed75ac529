use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_batch_task").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn build_tasks_assigns_slots_in_input_order() {
    let masks = MaskVolume::filled(2, 4, 4, 255).unwrap();
    let tasks = build_tasks(&["a.jpg", "b.jpg"], &masks, &["a.png", "b.png"]).unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[1].slot_index, 1);
    assert_eq!(tasks[1].input_path, PathBuf::from("b.jpg"));
    assert_eq!(tasks[1].output_path, PathBuf::from("b.png"));
}

#[test]
fn build_tasks_rejects_bad_shapes() {
    let masks = MaskVolume::filled(2, 4, 4, 255).unwrap();
    let none: [&str; 0] = [];

    let err = build_tasks(&none, &masks, &none).unwrap_err();
    assert!(err.to_string().contains("no images"));

    let err = build_tasks(&["a", "b"], &masks, &["a"]).unwrap_err();
    assert!(err.to_string().contains("must match output paths"));

    let err = build_tasks(&["a", "b", "c"], &masks, &["a", "b", "c"]).unwrap_err();
    assert!(err.to_string().contains("(3, height, width)"));
}

#[test]
fn file_compositor_writes_rgba_png() {
    let dir = scratch_dir("ok");
    let input = dir.join("in.png");
    image::RgbImage::from_pixel(3, 2, image::Rgb([9, 8, 7]))
        .save(&input)
        .unwrap();

    let task = TaskDescriptor {
        slot_index: 0,
        input_path: input,
        output_path: dir.join("nested").join("out.png"),
    };
    let mask = [0u8, 1, 0, 1, 0, 1];
    let runner = FileCompositor::new(&CompositeOpts::default());
    runner
        .run(&task, MaskPlane::new(&mask, 3, 2).unwrap())
        .unwrap();

    let out = image::open(&task.output_path).unwrap().to_rgba8();
    let alpha = out.pixels().map(|p| p.0[3]).collect::<Vec<_>>();
    assert_eq!(alpha, vec![0, 255, 0, 255, 0, 255]);
    assert!(out.pixels().all(|p| p.0[..3] == [9, 8, 7]));
}

#[test]
fn file_compositor_reports_each_failure_kind() {
    let dir = scratch_dir("fail");
    let runner = FileCompositor::new(&CompositeOpts {
        create_parent_dirs: false,
        ..CompositeOpts::default()
    });
    let mask = [255u8; 4];
    let plane = MaskPlane::new(&mask, 2, 2).unwrap();

    let missing = TaskDescriptor {
        slot_index: 0,
        input_path: dir.join("missing.png"),
        output_path: dir.join("missing_out.png"),
    };
    assert_eq!(runner.run(&missing, plane).unwrap_err().kind(), "load");

    let input = dir.join("big.png");
    image::RgbImage::new(3, 3).save(&input).unwrap();
    let mismatched = TaskDescriptor {
        slot_index: 1,
        input_path: input,
        output_path: dir.join("big_out.png"),
    };
    assert_eq!(
        runner.run(&mismatched, plane).unwrap_err().kind(),
        "dimension_mismatch"
    );
    assert!(!mismatched.output_path.exists());

    let input = dir.join("small.png");
    image::RgbImage::new(2, 2).save(&input).unwrap();
    let unwritable = TaskDescriptor {
        slot_index: 2,
        input_path: input,
        output_path: dir.join("no_such_dir").join("out.png"),
    };
    assert_eq!(runner.run(&unwritable, plane).unwrap_err().kind(), "write");
}

#[test]
fn transposed_frame_is_a_dimension_mismatch() {
    let dir = scratch_dir("transposed");
    let input = dir.join("tall.png");
    image::RgbImage::new(2, 3).save(&input).unwrap();
    let task = TaskDescriptor {
        slot_index: 0,
        input_path: input,
        output_path: dir.join("tall_out.png"),
    };
    let mask = [255u8; 6];
    let runner = FileCompositor::new(&CompositeOpts::default());

    let err = runner
        .run(&task, MaskPlane::new(&mask, 3, 2).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        TaskError::DimensionMismatch {
            image_w: 2,
            image_h: 3,
            mask_w: 3,
            mask_h: 2,
            ..
        }
    ));
    assert!(!task.output_path.exists());
}

#[test]
fn late_write_failure_leaves_no_partial_output() {
    let dir = scratch_dir("late_write");
    let input = dir.join("in.png");
    image::RgbImage::from_pixel(2, 2, image::Rgb([5, 6, 7]))
        .save(&input)
        .unwrap();
    let blocked = dir.join("out.png");
    std::fs::create_dir_all(blocked.join("occupied")).unwrap();

    let task = TaskDescriptor {
        slot_index: 0,
        input_path: input,
        output_path: blocked.clone(),
    };
    let mask = [255u8; 4];
    let runner = FileCompositor::new(&CompositeOpts::default());
    let err = runner
        .run(&task, MaskPlane::new(&mask, 2, 2).unwrap())
        .unwrap_err();

    assert_eq!(err.kind(), "write");
    assert!(blocked.is_dir());
    let leftovers = std::fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with(".tmp"))
        .collect::<Vec<_>>();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn heic_frames_fail_as_load_errors() {
    let dir = scratch_dir("heic");
    let input = dir.join("IMG_0001.heic");
    let mut bytes = vec![0, 0, 0, 0x18];
    bytes.extend_from_slice(b"ftypheic\0\0\0\0mif1heic");
    std::fs::write(&input, bytes).unwrap();

    let task = TaskDescriptor {
        slot_index: 0,
        input_path: input,
        output_path: dir.join("IMG_0001_rgba.png"),
    };
    let mask = [255u8; 4];
    let runner = FileCompositor::new(&CompositeOpts::default());
    let err = runner
        .run(&task, MaskPlane::new(&mask, 2, 2).unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), "load");
    assert!(!task.output_path.exists());
}
