/// Conversion into the owned byte buffer used for bencode keys and byte strings.
pub trait IntoBencodeBytes {
    fn into_bencode_bytes(self) -> Vec<u8>;
}

impl IntoBencodeBytes for Vec<u8> {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self
    }
}

impl IntoBencodeBytes for &Vec<u8> {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.clone()
    }
}

impl IntoBencodeBytes for &[u8] {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl<const N: usize> IntoBencodeBytes for &[u8; N] {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl<const N: usize> IntoBencodeBytes for [u8; N] {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl IntoBencodeBytes for String {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.into_bytes()
    }
}

impl IntoBencodeBytes for &String {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl IntoBencodeBytes for &str {
    fn into_bencode_bytes(self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}
