use bencode::{ben_bytes, ben_int, ben_list, ben_map, BDecodeOpt, BencodeValue};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const B_NESTED_LISTS: &[u8; 100] =
    b"lllllllllllllllllllllllllllllllllllllllllllllllllleeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"; // cspell:disable-line

/// A torrent-like dictionary of a few kilobytes.
fn multi_kb_bencode() -> Vec<u8> {
    let files = (0..100)
        .map(|i| {
            ben_map! {
                "length" => ben_int!(i * 1024),
                "path" => ben_list!(ben_bytes!("directory"), ben_bytes!(format!("file-{i}.bin")))
            }
        })
        .collect();

    (ben_map! {
        "announce" => ben_bytes!("http://127.0.0.1:18312/announce"),
        "info" => ben_map! {
            "files" => BencodeValue::List(files),
            "name" => ben_bytes!("sample"),
            "piece length" => ben_int!(262_144),
            "pieces" => ben_bytes!(vec![0xAB_u8; 20 * 64])
        }
    })
    .encode()
}

fn bench_nested_lists(bencode: &[u8]) {
    BencodeValue::decode(bencode, BDecodeOpt::new(50, true, true)).unwrap();
}

fn bench_multi_kb_bencode(bencode: &[u8]) {
    BencodeValue::decode(bencode, BDecodeOpt::default()).unwrap();
}

fn bench_multi_kb_encode(value: &BencodeValue) {
    value.encode();
}

fn criterion_benchmark(c: &mut Criterion) {
    let multi_kb = multi_kb_bencode();
    let multi_kb_value = BencodeValue::decode(&multi_kb, BDecodeOpt::default()).unwrap();

    c.bench_function("bencode nested lists", |b| {
        b.iter(|| bench_nested_lists(black_box(B_NESTED_LISTS)));
    });

    c.bench_function("bencode multi kb", |b| {
        b.iter(|| bench_multi_kb_bencode(black_box(&multi_kb)));
    });

    c.bench_function("bencode multi kb encode", |b| {
        b.iter(|| bench_multi_kb_encode(black_box(&multi_kb_value)));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
