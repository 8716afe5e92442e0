/// Maximum display weight of one post.
pub const POST_LIMIT: usize = 280;

const SINGLE_WIDTH_RANGES: [(u32, u32); 4] =
    [(0, 4351), (8192, 8205), (8208, 8223), (8242, 8247)];

/// Display weight of a single character under the platform's weighted
/// counting rule: codepoints in a handful of low ranges count 1,
/// everything else counts 2.
pub fn char_weight(c: char) -> usize {
    let cp = c as u32;
    if SINGLE_WIDTH_RANGES
        .iter()
        .any(|&(start, end)| cp >= start && cp < end)
    {
        1
    } else {
        2
    }
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(char_weight).sum()
}

/// Greedily pack ordered lines into the fewest newline-joined chunks
/// whose display width stays within `limit`. Joining two lines costs one
/// extra unit for the separator. A line is never split, so a single
/// oversize line becomes a chunk of its own. Empty input yields no
/// chunks.
pub fn pack_lines(lines: &[String], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in lines {
        if current.is_empty() {
            current.push_str(line);
        } else if display_width(&current) + display_width(line) + 1 <= limit {
            current.push('\n');
            current.push_str(line);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(line);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
