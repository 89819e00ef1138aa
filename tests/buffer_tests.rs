// tests/buffer_tests.rs
use secure_key_vault::error::CryptoError;
use secure_key_vault::SecureBuffer;

#[test]
fn test_new_copies_bytes() {
    let buffer = SecureBuffer::new(b"secret bytes");
    assert_eq!(buffer.as_bytes(), b"secret bytes");
    assert_eq!(buffer.len(), 12);
    assert!(!buffer.is_empty());
}

#[test]
fn test_zeroed_buffer() {
    let buffer = SecureBuffer::zeroed(16).unwrap();
    assert_eq!(buffer.len(), 16);
    assert!(buffer.as_bytes().iter().all(|&b| b == 0));

    let empty = SecureBuffer::zeroed(0).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_concat() {
    let a = SecureBuffer::new(b"hello ");
    let b = SecureBuffer::new(b"world");
    let joined = SecureBuffer::concat(&a, &b);
    assert_eq!(joined.as_bytes(), b"hello world");
    // Inputs are untouched
    assert_eq!(a.as_bytes(), b"hello ");
    assert_eq!(b.as_bytes(), b"world");
}

#[test]
fn test_slice() {
    let buffer = SecureBuffer::new(b"0123456789");
    let middle = buffer.slice(2, 5).unwrap();
    assert_eq!(middle.as_bytes(), b"234");

    let whole = buffer.slice(0, 10).unwrap();
    assert_eq!(whole.as_bytes(), buffer.as_bytes());

    let empty = buffer.slice(4, 4).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_slice_out_of_bounds() {
    let buffer = SecureBuffer::new(b"short");
    assert!(matches!(
        buffer.slice(0, 6),
        Err(CryptoError::OutOfBounds(_))
    ));
    assert!(matches!(
        buffer.slice(3, 2),
        Err(CryptoError::OutOfBounds(_))
    ));
}

#[test]
fn test_split_at() {
    let buffer = SecureBuffer::new(b"0123456789");
    let (head, tail) = buffer.split_at(4).unwrap();
    assert_eq!(head.as_bytes(), b"0123");
    assert_eq!(tail.as_bytes(), b"456789");

    let (all, rest) = buffer.split_at(10).unwrap();
    assert_eq!(all.as_bytes(), buffer.as_bytes());
    assert!(rest.is_empty());
}

#[test]
fn test_split_at_out_of_bounds() {
    let buffer = SecureBuffer::new(b"short");
    assert!(matches!(
        buffer.split_at(6),
        Err(CryptoError::OutOfBounds(_))
    ));
}

#[test]
fn test_constant_time_equality() {
    let a = SecureBuffer::new(b"same content");
    let b = SecureBuffer::new(b"same content");
    let c = SecureBuffer::new(b"Same content");

    assert!(a.ct_eq(&b));
    assert_eq!(a, b);
    assert!(!a.ct_eq(&c));
    assert_ne!(a, c);
}

#[test]
fn test_equality_length_mismatch() {
    let a = SecureBuffer::new(b"abc");
    let b = SecureBuffer::new(b"abcd");
    assert!(!a.ct_eq(&b));
    assert!(!b.ct_eq(&a));

    // A longer buffer whose tail is zeros is still a different buffer
    let c = SecureBuffer::new(&[1, 0]);
    let d = SecureBuffer::new(&[1]);
    assert!(!c.ct_eq(&d));
}

#[test]
fn test_hex_roundtrip() {
    let buffer = SecureBuffer::new(&[0x00, 0xde, 0xad, 0xbe, 0xef, 0xff]);
    let encoded = buffer.to_hex();
    assert_eq!(encoded, "00deadbeefff");
    let decoded = SecureBuffer::from_hex(&encoded).unwrap();
    assert_eq!(buffer, decoded);
}

#[test]
fn test_from_hex_rejects_malformed() {
    assert!(matches!(
        SecureBuffer::from_hex("abc"),
        Err(CryptoError::InvalidEncoding(_))
    ));
    assert!(matches!(
        SecureBuffer::from_hex("zzzz"),
        Err(CryptoError::InvalidEncoding(_))
    ));
}

#[test]
fn test_base64_roundtrip() {
    let buffer = SecureBuffer::new(b"binary\x00\x01\x02 payload");
    let encoded = buffer.to_base64();
    let decoded = SecureBuffer::from_base64(&encoded).unwrap();
    assert_eq!(buffer, decoded);
}

#[test]
fn test_from_base64_rejects_malformed() {
    assert!(matches!(
        SecureBuffer::from_base64("not valid base64!!!"),
        Err(CryptoError::InvalidEncoding(_))
    ));
}

#[test]
fn test_zeroize_overwrites_in_place() {
    let mut buffer = SecureBuffer::new(b"very secret");
    let original_len = buffer.len();

    buffer.zeroize();
    assert_eq!(buffer.len(), original_len);
    assert!(buffer.as_bytes().iter().all(|&b| b == 0));

    // Idempotent
    buffer.zeroize();
    assert!(buffer.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_debug_is_redacted() {
    let buffer = SecureBuffer::new(b"do not print me");
    let rendered = format!("{buffer:?}");
    assert!(rendered.contains("REDACTED"));
    assert!(!rendered.contains("do not print me"));
}

#[test]
fn test_fingerprint_is_short_and_stable() {
    let a = SecureBuffer::new(b"some key material");
    let b = SecureBuffer::new(b"some key material");
    let c = SecureBuffer::new(b"other key material");

    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
    assert_eq!(a.fingerprint().len(), 16);
    // Fingerprint never contains the material itself
    assert!(!a.fingerprint().contains("some"));
}
