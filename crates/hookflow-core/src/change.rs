//! 変更検出
//!
//! 意味的な比較はしない。正規化した出力と元のバイト列が一致するかだけを見る。

use crate::descriptor::Descriptor;

/// ディスクリプタが元のバイト列から変わったか
pub fn changed(original: &[u8], descriptor: &Descriptor) -> bool {
    render_change(original, descriptor).is_some()
}

/// 変わっていれば書き込むべきバイト列を返す
pub fn render_change(original: &[u8], descriptor: &Descriptor) -> Option<Vec<u8>> {
    let rendered = descriptor.to_bytes();
    (rendered != original).then_some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_bytes_are_unchanged() {
        let canonical = b"env:\n  LANG: C\nexpose:\n- \"2222:22\"\n";
        let descriptor = Descriptor::parse(canonical).unwrap();
        assert!(!changed(canonical, &descriptor));
        assert_eq!(render_change(canonical, &descriptor), None);
    }

    #[test]
    fn test_reformatting_counts_as_change() {
        // 意味は同じでもクォートの有無が違えば変更扱い
        let original = b"env:\n  LANG: \"C\"\n";
        let descriptor = Descriptor::parse(original).unwrap();
        assert_eq!(
            render_change(original, &descriptor),
            Some(b"env:\n  LANG: C\n".to_vec())
        );
    }
}
