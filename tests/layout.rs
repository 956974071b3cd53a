use textpick::{layout::field_width, Rect, SelectLayout};

// ============================================================================
// Rect
// ============================================================================

#[test]
fn test_rect_contains_is_half_open() {
    let rect = Rect::new(2, 3, 4, 2);
    assert!(rect.contains(2, 3));
    assert!(rect.contains(5, 4));
    assert!(!rect.contains(6, 3));
    assert!(!rect.contains(2, 5));
    assert!(!rect.contains(1, 3));
}

#[test]
fn test_empty_rect_contains_nothing() {
    let rect = Rect::new(5, 5, 0, 1);
    assert!(rect.is_empty());
    assert!(!rect.contains(5, 5));
}

// ============================================================================
// Select layout
// ============================================================================

#[test]
fn test_field_toggle_and_rows_geometry() {
    let layout = SelectLayout::compute(4, 2, 10, 3);

    assert_eq!(layout.field, Rect::new(4, 2, 10, 1));
    // Toggle is the last cell of the field row.
    assert_eq!(layout.toggle, Rect::new(13, 2, 1, 1));
    assert_eq!(layout.rows.len(), 3);
    assert_eq!(layout.rows[0], Rect::new(4, 3, 10, 1));
    assert_eq!(layout.rows[2], Rect::new(4, 5, 10, 1));
}

#[test]
fn test_bounds_cover_field_and_rows() {
    let closed = SelectLayout::compute(4, 2, 10, 0);
    assert_eq!(closed.bounds, Rect::new(4, 2, 10, 1));

    let open = SelectLayout::compute(4, 2, 10, 2);
    assert_eq!(open.bounds, Rect::new(4, 2, 10, 3));
    assert!(open.bounds.contains(4, 4));
    assert!(!open.bounds.contains(4, 5));
}

#[test]
fn test_row_at_hit() {
    let layout = SelectLayout::compute(0, 0, 8, 3);
    assert_eq!(layout.row_at(3, 1), Some(0));
    assert_eq!(layout.row_at(3, 3), Some(2));
    // Field row and points outside are not candidate rows.
    assert_eq!(layout.row_at(3, 0), None);
    assert_eq!(layout.row_at(9, 1), None);
}

#[test]
fn test_toggle_is_inside_field() {
    let layout = SelectLayout::compute(0, 0, 6, 0);
    assert!(layout.field.contains(layout.toggle.x, layout.toggle.y));
}

// ============================================================================
// Field width
// ============================================================================

#[test]
fn test_field_width_uses_display_width() {
    let options = vec!["ab".to_string(), "abcd".to_string()];
    assert_eq!(field_width(&options, ""), 7);

    // Placeholder counts too.
    assert_eq!(field_width(&options, "Select or type..."), 20);

    // CJK labels are two cells per character.
    let wide = vec!["日本".to_string()];
    assert_eq!(field_width(&wide, ""), 7);

    assert_eq!(field_width(&[], ""), 3);
}
