use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TorqueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TorqueError::io("x").to_string().contains("io error:"));
    assert!(
        TorqueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TorqueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn dimension_mismatch_message_names_both_shapes() {
    let err = TaskError::DimensionMismatch {
        path: PathBuf::from("frame_0002.png"),
        image_w: 64,
        image_h: 48,
        mask_w: 32,
        mask_h: 32,
    };
    let msg = err.to_string();
    assert!(msg.contains("64x48"));
    assert!(msg.contains("32x32"));
    assert!(msg.contains("frame_0002.png"));
    assert_eq!(err.kind(), "dimension_mismatch");
}

#[test]
fn task_error_kinds_are_distinct() {
    let kinds = [
        TaskError::Load {
            path: PathBuf::new(),
            reason: String::new(),
        }
        .kind(),
        TaskError::Write {
            path: PathBuf::new(),
            reason: String::new(),
        }
        .kind(),
        TaskError::Panicked {
            slot: 0,
            message: String::new(),
        }
        .kind(),
    ];
    assert_eq!(kinds, ["load", "write", "panicked"]);
}
