#![no_main]
use libfuzzer_sys::fuzz_target;
use rar_peek::codec::{read_utf16_string, TextDecoding};
use rar_peek::parsing::{
    ArchiveHeaderParser, BlockHeaderParser, FileHeaderParser, MarkerHeaderParser,
};

fuzz_target!(|data: &[u8]| {
    let _ = MarkerHeaderParser::parse(data);
    let _ = ArchiveHeaderParser::parse(data);
    let _ = BlockHeaderParser::parse(data);
    let _ = FileHeaderParser::parse(data, 0, TextDecoding::Utf8);
    let _ = FileHeaderParser::parse(data, u64::MAX, TextDecoding::Raw);
    let _ = read_utf16_string(data, None, 0, true);
});
