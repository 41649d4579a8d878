use sha1::{Digest, Sha1};

use crate::snapshot::element::ElementInfo;

/// SHA-1 over every element's identity and box, in scan order.
///
/// Two scans of an unchanged layout give the same digest; any moved,
/// added or removed control changes it.
pub fn layout_fingerprint<'a>(elements: impl IntoIterator<Item = &'a ElementInfo>) -> String {
    let mut hasher = Sha1::new();
    for el in elements {
        let p = &el.position;
        hasher.update(el.id.as_bytes());
        hasher.update([0]);
        hasher.update(el.element_type.as_bytes());
        hasher.update([0]);
        for v in [p.left(), p.top(), p.width(), p.height()] {
            hasher.update(v.to_le_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
