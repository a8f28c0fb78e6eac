use broadside::{BitBoard, BitBoardError, CellMask, Coordinate};

#[test]
fn test_new_sizes() {
    // Success for the largest board that fits in a u128
    assert!(CellMask::new(11).is_ok());

    // Failure when board is too large
    let err = CellMask::new(12);
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { n: 12, capacity: 128 })));

    let err = BitBoard::<u8>::new(3);
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
    assert!(BitBoard::<u16>::new(4).is_ok());
}

#[test]
fn test_get_set_clear() {
    let mut bb = BitBoard::<u16>::new(4).unwrap();
    assert!(bb.is_empty());

    bb.set(Coordinate::new(1, 1)).unwrap();
    assert!(bb.get(Coordinate::new(1, 1)));
    assert_eq!(bb.count_ones(), 1);

    bb.clear(Coordinate::new(1, 1)).unwrap();
    assert!(!bb.get(Coordinate::new(1, 1)));
    assert!(bb.is_empty());

    let err = bb.set(Coordinate::new(4, 0)).unwrap_err();
    assert_eq!(err, BitBoardError::IndexOutOfBounds { row: 4, col: 0 });
    // out of range reads are simply unset
    assert!(!bb.get(Coordinate::new(9, 9)));
}

#[test]
fn test_from_cells_and_iter() {
    let bb = CellMask::from_cells(4, [Coordinate::new(3, 3), Coordinate::new(0, 1)]).unwrap();
    let cells: Vec<_> = bb.iter().collect();
    assert_eq!(cells, vec![Coordinate::new(0, 1), Coordinate::new(3, 3)]);
}

#[test]
fn test_not_stays_inside_board() {
    let mut bb = CellMask::new(3).unwrap();
    bb.set(Coordinate::new(0, 0)).unwrap();
    let inv = !bb;
    assert_eq!(inv.count_ones(), 8);
    assert!(!inv.get(Coordinate::new(0, 0)));

    let mut full = CellMask::new(3).unwrap();
    full.fill();
    assert_eq!(full.count_ones(), 9);
    assert!((!full).is_empty());
}

#[test]
fn test_and_or() {
    let a = CellMask::from_cells(5, [Coordinate::new(0, 0), Coordinate::new(2, 2)]).unwrap();
    let b = CellMask::from_cells(5, [Coordinate::new(2, 2), Coordinate::new(4, 4)]).unwrap();
    assert_eq!((a & b).iter().collect::<Vec<_>>(), vec![Coordinate::new(2, 2)]);
    assert_eq!((a | b).count_ones(), 3);

    let mut c = a;
    c |= b;
    c &= b;
    assert_eq!(c, b);
}
