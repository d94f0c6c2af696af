//! End-to-end scenarios for the buffer, including a file-conduit round trip.

use std::io::{Seek, SeekFrom, Write};

use bedrock_rs::buf::{scan, Buffer, BufferError, FileConduit, MemoryConduit};

#[test]
fn append_overflows_an_unbound_buffer() {
    let mut buffer = Buffer::with_capacity(8);
    buffer.append(b"hello").unwrap();
    assert_eq!(buffer.readable(), 5);
    assert_eq!(
        buffer.append(b" world"),
        Err(BufferError::Overflow {
            requested: 6,
            writable: 3
        })
    );
}

#[test]
fn token_scan_over_prepopulated_memory() {
    let mut buffer = Buffer::with_capacity(64);
    buffer.append(b"foo\nbar\nbaz").unwrap();

    let mut tokens: Vec<Vec<u8>> = Vec::new();
    loop {
        let start = buffer.position();
        if !buffer.next(scan::lines()).unwrap() {
            break;
        }
        let end = buffer.position();
        // Re-borrow the window to materialize the token without the newline.
        buffer.skip(-((end - start) as isize)).unwrap();
        let token = buffer.get(end - start - 1).unwrap().to_vec();
        tokens.push(token);
        buffer.skip(1).unwrap();
    }

    assert_eq!(tokens, vec![b"foo".to_vec(), b"bar".to_vec()]);
    assert_eq!(buffer.readable(), 0, "the delimiterless tail was skipped");
}

#[test]
fn compression_round_trip() {
    let mut buffer = Buffer::with_capacity(16);
    buffer.append(b"0123456789").unwrap();
    assert_eq!(buffer.get(4).unwrap(), b"0123");
    assert_eq!(buffer.position(), 4);

    buffer.compress();
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.limit(), 6);
    assert_eq!(buffer.as_slice(), b"456789");

    buffer.compress();
    assert_eq!(buffer.as_slice(), b"456789", "compression is idempotent");
}

#[test]
fn memory_conduit_feeds_a_bound_buffer() {
    let conduit = MemoryConduit::with_input(b"alpha,beta,gamma".to_vec()).preferred(64);
    let mut buffer = Buffer::bound(Box::new(conduit));

    assert!(buffer.next(scan::delimiter(b',')).unwrap());
    assert_eq!(buffer.position(), 6);
    assert!(buffer.next(scan::delimiter(b',')).unwrap());
    assert!(!buffer.next(scan::delimiter(b',')).unwrap());
    assert_eq!(buffer.readable(), 0);
}

#[test]
fn pattern_scanner_splits_on_crlf() {
    let conduit = MemoryConduit::with_input(b"one\r\ntwo\r\nthree".to_vec()).preferred(64);
    let mut buffer = Buffer::bound(Box::new(conduit));

    assert!(buffer.next(scan::pattern(b"\r\n")).unwrap());
    assert_eq!(buffer.position(), 5);
    assert!(buffer.next(scan::pattern(b"\r\n")).unwrap());
    assert!(!buffer.next(scan::pattern(b"\r\n")).unwrap());
    assert_eq!(buffer.readable(), 0);
}

#[test]
fn file_conduit_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flow.log");

    {
        let sink = FileConduit::create(&path).unwrap();
        let mut buffer = Buffer::bound(Box::new(sink));
        for line in ["first\n", "second\n", "third\n"] {
            buffer.append(line.as_bytes()).unwrap();
        }
        buffer.flush().unwrap();
    }

    let source = FileConduit::open(&path).unwrap();
    let mut buffer = Buffer::bound(Box::new(source));
    let mut lines = 0;
    while buffer.next(scan::lines()).unwrap() {
        lines += 1;
    }
    assert_eq!(lines, 3);
}

#[test]
fn oversized_writes_stream_straight_through_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bulk.bin");

    let sink = FileConduit::create(&path).unwrap();
    let mut buffer = Buffer::with_capacity(16);
    buffer.bind(Box::new(sink));

    let payload = vec![0xABu8; 1024];
    buffer.append(b"hdr").unwrap();
    buffer.append(&payload).unwrap();
    buffer.flush().unwrap();

    let written = std::fs::read(&path).unwrap();
    assert_eq!(written.len(), 3 + payload.len());
    assert_eq!(&written[..3], b"hdr");
    assert!(written[3..].iter().all(|&byte| byte == 0xAB));
}

#[test]
fn wait_blocks_on_pre_seeded_input() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"ready").unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let mut buffer = Buffer::bound(Box::new(FileConduit::from_file(file)));
    buffer.wait().unwrap();
    assert!(buffer.readable() >= 1);
}
