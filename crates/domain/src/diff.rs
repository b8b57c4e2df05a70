//! Word-level difference rendering for change log entries.
//!
//! Removed words are wrapped in `~~..~~`, added words in `**..**`. Short
//! texts render in full; longer ones render each change with two words of
//! context and `...` where unchanged words were skipped.

/// Number of unchanged context words kept around each change.
const CONTEXT_WORDS: usize = 2;

/// Unchanged runs shorter than this merge the changes around them into one
/// block.
const MERGE_BELOW: usize = 5;

/// Either source text at or below this many words is rendered in full.
const FULL_RENDER_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: Tag,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

#[derive(Debug, Clone, Copy)]
struct DiffBlock {
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

fn push_pending(
    codes: &mut Vec<Opcode>,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
) {
    let tag = match (a_start < a_end, b_start < b_end) {
        (true, true) => Tag::Replace,
        (true, false) => Tag::Delete,
        (false, true) => Tag::Insert,
        (false, false) => return,
    };
    codes.push(Opcode {
        tag,
        a_start,
        a_end,
        b_start,
        b_end,
    });
}

/// Aligns the two word sequences on their longest common subsequence and
/// reports the edit script as contiguous opcodes.
fn opcodes(old: &[&str], new: &[&str]) -> Vec<Opcode> {
    let old_len = old.len();
    let new_len = new.len();
    let mut lcs = vec![vec![0usize; new_len + 1]; old_len + 1];
    for i in (0..old_len).rev() {
        for j in (0..new_len).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut codes = Vec::new();
    let (mut i, mut j) = (0, 0);
    let (mut pending_a, mut pending_b) = (0, 0);
    while i < old_len || j < new_len {
        if i < old_len && j < new_len && old[i] == new[j] {
            push_pending(&mut codes, pending_a, i, pending_b, j);
            let (equal_a, equal_b) = (i, j);
            while i < old_len && j < new_len && old[i] == new[j] {
                i += 1;
                j += 1;
            }
            codes.push(Opcode {
                tag: Tag::Equal,
                a_start: equal_a,
                a_end: i,
                b_start: equal_b,
                b_end: j,
            });
            pending_a = i;
            pending_b = j;
        } else if j == new_len || (i < old_len && lcs[i + 1][j] >= lcs[i][j + 1]) {
            i += 1;
        } else {
            j += 1;
        }
    }
    push_pending(&mut codes, pending_a, old_len, pending_b, new_len);

    codes
}

/// Groups changed opcodes into blocks, absorbing unchanged runs shorter than
/// [`MERGE_BELOW`] between them.
fn diff_blocks(codes: &[Opcode]) -> Vec<DiffBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<DiffBlock> = None;

    for code in codes {
        if code.tag == Tag::Equal {
            if let Some(mut block) = current.take() {
                if code.a_end - code.a_start < MERGE_BELOW {
                    block.a_end = code.a_end;
                    block.b_end = code.b_end;
                    current = Some(block);
                } else {
                    blocks.push(block);
                }
            }
        } else if let Some(block) = current.as_mut() {
            block.a_end = code.a_end;
            block.b_end = code.b_end;
        } else {
            current = Some(DiffBlock {
                a_start: code.a_start,
                a_end: code.a_end,
                b_start: code.b_start,
                b_end: code.b_end,
            });
        }
    }
    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

fn removed(words: &[&str]) -> String {
    format!("~~{}~~", words.join(" "))
}

fn added(words: &[&str]) -> String {
    format!("**{}**", words.join(" "))
}

fn join_deduplicated(words: Vec<String>) -> String {
    let mut result: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        if word == "..." && result.last().map(String::as_str) == Some("...") {
            continue;
        }
        result.push(word);
    }

    result.join(" ")
}

fn render_full_combined(old: &[&str], new: &[&str], codes: &[Opcode]) -> String {
    let mut words: Vec<String> = Vec::new();
    for code in codes {
        match code.tag {
            Tag::Equal => {
                words.extend(old[code.a_start..code.a_end].iter().map(ToString::to_string));
            }
            Tag::Replace => {
                words.push(removed(&old[code.a_start..code.a_end]));
                words.push(added(&new[code.b_start..code.b_end]));
            }
            Tag::Delete => words.push(removed(&old[code.a_start..code.a_end])),
            Tag::Insert => words.push(added(&new[code.b_start..code.b_end])),
        }
    }

    words.join(" ")
}

/// Renders one side of an abridged diff: the changed ranges come from
/// `marked`, the context from `source`.
fn render_abridged_side(
    source: &[&str],
    blocks: impl Iterator<Item = (usize, usize, String)>,
) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut previous_end = 0;

    for (start, end, marked) in blocks {
        let context_start = start.saturating_sub(CONTEXT_WORDS).max(previous_end);
        let context_end = (end + CONTEXT_WORDS).min(source.len());

        if context_start > previous_end {
            words.push("...".to_owned());
        }
        words.extend(source[context_start..start].iter().map(ToString::to_string));
        if !marked.is_empty() {
            words.push(marked);
        }
        words.extend(source[end..context_end].iter().map(ToString::to_string));

        previous_end = context_end;
    }
    if previous_end < source.len() {
        words.push("...".to_owned());
    }

    join_deduplicated(words)
}

/// Renders the differences between two texts as a single highlighted string.
///
/// Identical texts render as an empty string.
#[must_use]
pub fn render_combined(old_text: &str, new_text: &str) -> String {
    if old_text == new_text {
        return String::new();
    }

    let old: Vec<&str> = old_text.split_whitespace().collect();
    let new: Vec<&str> = new_text.split_whitespace().collect();
    let codes = opcodes(&old, &new);

    if old.len() <= FULL_RENDER_LIMIT || new.len() <= FULL_RENDER_LIMIT {
        return render_full_combined(&old, &new, &codes);
    }

    let blocks = diff_blocks(&codes);
    render_abridged_side(
        &old,
        blocks.iter().map(|block| {
            let mut marked = String::new();
            if block.a_start < block.a_end {
                marked.push_str(&removed(&old[block.a_start..block.a_end]));
            }
            if block.b_start < block.b_end {
                if !marked.is_empty() {
                    marked.push(' ');
                }
                marked.push_str(&added(&new[block.b_start..block.b_end]));
            }
            (block.a_start, block.a_end, marked)
        }),
    )
}

/// Renders the differences between two texts as a pair of highlighted
/// strings, removals on the old side and additions on the new side.
///
/// Identical texts render as a pair of empty strings.
#[must_use]
pub fn render_separate(old_text: &str, new_text: &str) -> (String, String) {
    if old_text == new_text {
        return (String::new(), String::new());
    }

    let old: Vec<&str> = old_text.split_whitespace().collect();
    let new: Vec<&str> = new_text.split_whitespace().collect();
    let codes = opcodes(&old, &new);

    if old.len() <= FULL_RENDER_LIMIT || new.len() <= FULL_RENDER_LIMIT {
        let mut old_words: Vec<String> = Vec::new();
        let mut new_words: Vec<String> = Vec::new();
        for code in &codes {
            match code.tag {
                Tag::Equal => {
                    old_words
                        .extend(old[code.a_start..code.a_end].iter().map(ToString::to_string));
                    new_words
                        .extend(new[code.b_start..code.b_end].iter().map(ToString::to_string));
                }
                Tag::Replace => {
                    old_words.push(removed(&old[code.a_start..code.a_end]));
                    new_words.push(added(&new[code.b_start..code.b_end]));
                }
                Tag::Delete => old_words.push(removed(&old[code.a_start..code.a_end])),
                Tag::Insert => new_words.push(added(&new[code.b_start..code.b_end])),
            }
        }
        return (old_words.join(" "), new_words.join(" "));
    }

    let blocks = diff_blocks(&codes);
    let old_side = render_abridged_side(
        &old,
        blocks.iter().map(|block| {
            let marked = if block.a_start < block.a_end {
                removed(&old[block.a_start..block.a_end])
            } else {
                String::new()
            };
            (block.a_start, block.a_end, marked)
        }),
    );
    let new_side = render_abridged_side(
        &new,
        blocks.iter().map(|block| {
            let marked = if block.b_start < block.b_end {
                added(&new[block.b_start..block.b_end])
            } else {
                String::new()
            };
            (block.b_start, block.b_end, marked)
        }),
    );

    (old_side, new_side)
}
