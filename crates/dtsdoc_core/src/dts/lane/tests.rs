use crate::dts::{Lane, LaneLayout, Lanes, ShapeError, Stream};

#[test]
fn reads_consume_exactly_one_element_width() {
	let bytes = [1_u8, 0, 2, 0, 3, 0];
	let mut lane = Lane::<u16>::new(&bytes, 8);
	assert_eq!(lane.read().expect("first"), 1);
	assert_eq!(lane.offset(), 10);
	assert_eq!(lane.remaining(), 4);
	assert_eq!(lane.remaining_words(), 2);
}

#[test]
fn read_past_end_is_out_of_data_not_zero() {
	let bytes = [7_u8, 0, 0, 0, 9, 9];
	let mut lane = Lane::<u32>::new(&bytes, 16);
	assert_eq!(lane.read().expect("one whole word"), 7);
	let err = lane.read().expect_err("partial word must not decode");
	assert!(matches!(
		err,
		ShapeError::OutOfData {
			stream: Stream::Lane32,
			at: 20,
			need: 4,
			rem: 2
		}
	));
	assert_eq!(lane.remaining(), 2, "failed read must not advance");
}

#[test]
fn oversized_record_count_fails_on_read_not_allocation() {
	let bytes = [0_u8; 8];
	let mut lane = Lane::<u32>::new(&bytes, 0);
	let err = lane.read_records(usize::MAX / 2, 3, |lane| lane.read()).expect_err("count exceeds lane");
	assert!(matches!(err, ShapeError::OutOfData { stream: Stream::Lane32, .. }));
}

#[test]
fn split_carves_three_contiguous_lanes() {
	let region: Vec<u8> = (0..24).collect();
	let layout = LaneLayout {
		total_words: 6,
		start16: 3,
		start8: 5,
	};
	let lanes = Lanes::split(&region, 16, layout).expect("layout matches region");
	assert_eq!(lanes.l32.remaining(), 12);
	assert_eq!(lanes.l16.remaining(), 8);
	assert_eq!(lanes.l8.remaining(), 4);
	assert_eq!(lanes.l16.offset(), 28);
	assert_eq!(lanes.l8.offset(), 36);
	assert_eq!(lanes.checkpoints(), 0);
}

#[test]
fn split_rejects_region_of_wrong_size() {
	let region = [0_u8; 20];
	let layout = LaneLayout {
		total_words: 6,
		start16: 3,
		start8: 5,
	};
	assert!(matches!(Lanes::split(&region, 0, layout), Err(ShapeError::InvalidLaneLayout { .. })));
}
