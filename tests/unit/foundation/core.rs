use super::*;

#[test]
fn dimensions_reject_zero_extents() {
    assert!(Dimensions::new(0, 4).is_err());
    assert!(Dimensions::new(4, 0).is_err());
    let d = Dimensions::new(3, 2).unwrap();
    assert_eq!(d.pixel_count(), 6);
    assert_eq!(d.to_string(), "3x2");
}
