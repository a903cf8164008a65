#![no_main]
use libfuzzer_sys::fuzz_target;
use pawns::chess::board::Board;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(board) = Board::from_placement(input) else {
        return;
    };
    let placement = board.placement();
    let reparsed =
        Board::from_placement(&placement).expect("serialized placement should be accepted");
    assert_eq!(board, reparsed);
});
