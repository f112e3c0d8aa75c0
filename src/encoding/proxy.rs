//! The encoder's intermediate tree.
//!
//! Every value becomes one [`Proxy`] holding its control byte, header and payload, so
//! the optimizer can rewrite nodes in place before anything is written out.

use super::{ser::Serializer, varint::Header};
use crate::inum::Inum;
use bytes::Bytes;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Proxy {
    /// The integer this node encodes, consulted for delta encoding.
    pub(crate) origin: Option<Inum>,
    pub(crate) control: u8,
    /// Length prefix, fixed-width digits, delta or back-reference hash.
    pub(crate) header: Header,
    /// Text or blob body.
    pub(crate) payload: Bytes,
    /// Back-reference slot of the payload, for text and blobs.
    pub(crate) hash: Option<u8>,
    pub(crate) children: Vec<Proxy>,
}

impl Proxy {
    pub(crate) fn new(control: u8) -> Self {
        Proxy {
            origin: None,
            control,
            header: Header::new(),
            payload: Bytes::new(),
            hash: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn with_header(control: u8, header: Header) -> Self {
        Proxy {
            header,
            ..Proxy::new(control)
        }
    }

    /// Encoded size in bytes.
    ///
    /// `depth == 0` measures the whole subtree. Otherwise only `depth` levels are
    /// counted, so `size(1)` is the node's own bytes.
    pub(crate) fn size(&self, depth: usize) -> usize {
        let mut size = 1 + self.header.len() + self.payload.len();
        if depth != 1 {
            let child_depth = depth.saturating_sub(1);
            size += self.children.iter().map(|c| c.size(child_depth)).sum::<usize>();
        }
        size
    }

    /// Writes the subtree depth-first: control byte, header, payload, then children.
    pub(crate) fn write<S: Serializer>(&self, out: &mut S) {
        out.put_u8(self.control);
        out.put_slice(&self.header);
        out.put_slice(&self.payload);
        for child in &self.children {
            child.write(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn tree() -> Proxy {
        let mut leaf = Proxy::with_header(0x5e, smallvec![3]);
        leaf.payload = Bytes::from_static(b"abc");

        let mut mid = Proxy::new(0x81);
        mid.children.push(leaf);

        let mut root = Proxy::new(0x82);
        root.children.push(mid);
        root.children.push(Proxy::new(0x01));
        root
    }

    #[test]
    fn size_depths() {
        let root = tree();
        assert_eq!(root.size(1), 1);
        assert_eq!(root.size(2), 3);
        assert_eq!(root.size(3), 8);
        assert_eq!(root.size(0), 8);
    }

    #[test]
    fn writes_depth_first() {
        let mut out = Vec::new();
        tree().write(&mut out);
        assert_eq!(out, vec![0x82, 0x81, 0x5e, 3, b'a', b'b', b'c', 0x01]);
        assert_eq!(out.len(), tree().size(0));
    }
}
