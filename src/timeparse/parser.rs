//! Rule-driven parser assembling [`TimeMatch`] records from tokens.

use crate::timeparse::DayReference;
use crate::timeparse::MAX_MATCHES;
use crate::timeparse::Meridiem;
use crate::timeparse::TargetRef;
use crate::timeparse::TimeMatch;
use crate::timeparse::tokenizer::Token;
use crate::timeparse::tokenizer::TokenKind;
use crate::timeparse::tokenizer::tokenize;

/// Lead-in prepositions that may introduce a clock time.
const LEAD_INS: [&str; 5] = ["at", "by", "till", "before", "after"];

/// Sentence punctuation accepted as a match boundary.
const BOUNDARY_PUNCT: [char; 4] = ['.', '?', '!', ','];

/// Extracts up to [`MAX_MATCHES`] clock-time mentions from a message.
///
/// A candidate with no lead-in preposition, no minute, no meridiem, no day
/// reference and no target is treated as noise (a bare 1-2 digit number is
/// not a time) and does not count toward the cap, but its tokens are still
/// consumed.
pub fn extract_times(content: &str) -> Vec<TimeMatch> {
    let tokens = tokenize(content);
    let mut matches = Vec::new();
    let mut pos = 0;

    while pos < tokens.len() && matches.len() < MAX_MATCHES {
        match try_match(&tokens, pos) {
            Some(candidate) => {
                pos = candidate.next_pos;
                if !candidate.noise {
                    matches.push(candidate.time);
                }
            }
            None => pos += 1,
        }
    }

    matches
}

struct Candidate {
    time: TimeMatch,
    next_pos: usize,
    noise: bool,
}

/// Attempts to parse one time expression starting at `start`. Components are
/// matched in a fixed order: lead-in, hour, `:`minute, meridiem, day
/// reference, `for <target>`, boundary.
fn try_match(tokens: &[Token<'_>], start: usize) -> Option<Candidate> {
    // A match must begin at a word boundary.
    if !tokens[start].space_before {
        return None;
    }

    let mut pos = start;
    let lead_in = LEAD_INS.iter().any(|w| tokens[pos].is_word(w));
    if lead_in {
        pos += 1;
    }

    let hour = parse_hour(tokens.get(pos)?)?;
    pos += 1;

    let minute = parse_minute(tokens, pos);
    if minute.is_some() {
        pos += 2;
    }

    let meridiem = parse_meridiem(tokens.get(pos));
    if meridiem.is_some() {
        pos += 1;
        // Tolerate one glued punctuation character, "pm." / "pm!"
        if let Some(t) = tokens.get(pos)
            && !t.space_before
            && matches!(t.kind, TokenKind::Punct(_))
        {
            pos += 1;
        }
    }

    let (day_ref, consumed) = parse_day_reference(tokens, pos);
    pos += consumed;

    let (target, consumed) = parse_target(tokens, pos);
    pos += consumed;

    if !at_boundary(tokens, pos) {
        return None;
    }

    let noise = !lead_in
        && minute.is_none()
        && meridiem.is_none()
        && day_ref.is_none()
        && target.is_none();

    Some(Candidate {
        time: TimeMatch {
            hour,
            minute,
            meridiem,
            day_ref,
            target,
        },
        next_pos: pos,
        noise,
    })
}

/// Hour 1-12, at most two digits, zero-padding allowed for 01-09.
fn parse_hour(token: &Token<'_>) -> Option<u8> {
    if token.text.len() > 2 {
        return None;
    }
    match token.number()? {
        h @ 1..=12 => Some(h as u8),
        _ => None,
    }
}

/// `:` followed by an exactly-two-digit minute, 00-59.
fn parse_minute(tokens: &[Token<'_>], pos: usize) -> Option<u8> {
    if tokens.get(pos)?.kind != TokenKind::Colon {
        return None;
    }
    let minute = tokens.get(pos + 1)?;
    if minute.text.len() != 2 {
        return None;
    }
    match minute.number()? {
        m @ 0..=59 => Some(m as u8),
        _ => None,
    }
}

fn parse_meridiem(token: Option<&Token<'_>>) -> Option<Meridiem> {
    let token = token?;
    if token.is_word("am") {
        Some(Meridiem::Am)
    } else if token.is_word("pm") {
        Some(Meridiem::Pm)
    } else {
        None
    }
}

/// Day reference from the fixed vocabulary, with flexible internal
/// whitespace. Returns the reference and the number of tokens consumed.
fn parse_day_reference(tokens: &[Token<'_>], pos: usize) -> (Option<DayReference>, usize) {
    let Some(first) = tokens.get(pos) else {
        return (None, 0);
    };

    if first.is_word("yesterday") {
        return (Some(DayReference::Yesterday), 1);
    }
    if first.is_word("tomorrow") {
        return (Some(DayReference::Tomorrow), 1);
    }
    if first.is_word("day")
        && let (Some(second), Some(third)) = (tokens.get(pos + 1), tokens.get(pos + 2))
    {
        if second.is_word("after") && third.is_word("tomorrow") {
            return (Some(DayReference::DayAfterTomorrow), 3);
        }
        if second.is_word("before") && third.is_word("yesterday") {
            return (Some(DayReference::DayBeforeYesterday), 3);
        }
    }

    (None, 0)
}

/// `for <mention-or-id-or-name>`. If the word after `for` is not a usable
/// target the `for` itself is left unconsumed, matching an optional-group
/// miss. Returns the target and the number of tokens consumed.
fn parse_target(tokens: &[Token<'_>], pos: usize) -> (Option<TargetRef>, usize) {
    if !tokens.get(pos).is_some_and(|t| t.is_word("for")) {
        return (None, 0);
    }

    let Some(token) = tokens.get(pos + 1) else {
        return (None, 0);
    };

    match token.kind {
        TokenKind::Mention(id) => (Some(TargetRef::Mention(id)), 2),
        TokenKind::Number => match token.text.parse::<u64>() {
            Ok(id) => (Some(TargetRef::Id(id)), 2),
            Err(_) => (None, 0),
        },
        TokenKind::Word => {
            // Names may contain dots and underscores; glued tokens such as
            // "j.doe" span multiple word/punct tokens.
            let (name, consumed) = collect_name(tokens, pos + 1);
            (Some(TargetRef::Name(name)), 1 + consumed)
        }
        _ => (None, 0),
    }
}

/// Joins adjacent word, dot and underscore tokens into one name.
fn collect_name(tokens: &[Token<'_>], pos: usize) -> (String, usize) {
    let mut name = tokens[pos].text.to_lowercase();
    let mut consumed = 1;

    while let Some(t) = tokens.get(pos + consumed) {
        let joinable = !t.space_before
            && matches!(t.kind, TokenKind::Word | TokenKind::Punct('.') | TokenKind::Punct('_'));
        if !joinable {
            break;
        }
        name.push_str(&t.text.to_lowercase());
        consumed += 1;
    }

    // Trailing dots are sentence punctuation, not part of the name.
    while name.ends_with('.') {
        name.pop();
        consumed -= 1;
    }

    (name, consumed)
}

/// A match must end at whitespace, sentence punctuation or end-of-input.
fn at_boundary(tokens: &[Token<'_>], pos: usize) -> bool {
    match tokens.get(pos) {
        None => true,
        Some(t) => {
            t.space_before || matches!(t.kind, TokenKind::Punct(c) if BOUNDARY_PUNCT.contains(&c))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pm_time() {
        let matches = extract_times("let's battle at 6pm my time");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hour, 6);
        assert_eq!(matches[0].minute, None);
        assert_eq!(matches[0].meridiem, Some(Meridiem::Pm));
        assert_eq!(matches[0].day_ref, None);
        assert_eq!(matches[0].target, None);
    }

    #[test]
    fn test_time_with_minute_and_question_boundary() {
        let matches = extract_times("does 11:30am suit you?");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hour, 11);
        assert_eq!(matches[0].minute, Some(30));
        assert_eq!(matches[0].meridiem, Some(Meridiem::Am));
    }

    #[test]
    fn test_zero_padded_hour() {
        let matches = extract_times("maybe 09pm?");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hour, 9);
    }

    #[test]
    fn test_bare_number_is_noise() {
        assert!(extract_times("i rolled a 7 and then an 11").is_empty());
    }

    #[test]
    fn test_lead_in_without_meridiem_is_kept() {
        let matches = extract_times("see you at 6");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].hour, 6);
        assert_eq!(matches[0].meridiem, None);
    }

    #[test]
    fn test_hour_out_of_range_is_skipped() {
        assert!(extract_times("at 13 sharp").is_empty());
        assert!(extract_times("at 0").is_empty());
    }

    #[test]
    fn test_minute_requires_two_digits() {
        // ":5" is not a minute, and the dangling colon breaks the boundary.
        assert!(extract_times("6:5pm").is_empty());
    }

    #[test]
    fn test_day_references() {
        let matches = extract_times("3pm tomorrow or 4pm day after tomorrow");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].day_ref, Some(DayReference::Tomorrow));
        assert_eq!(matches[1].day_ref, Some(DayReference::DayAfterTomorrow));

        let matches = extract_times("it happened 5pm day before yesterday");
        assert_eq!(matches[0].day_ref, Some(DayReference::DayBeforeYesterday));
    }

    #[test]
    fn test_day_reference_flexible_whitespace() {
        let matches = extract_times("6pm day  after   tomorrow");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].day_ref, Some(DayReference::DayAfterTomorrow));
    }

    #[test]
    fn test_target_mention() {
        let matches = extract_times("8:15pm for <@123456789>");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].minute, Some(15));
        assert_eq!(matches[0].target, Some(TargetRef::Mention(123456789)));
    }

    #[test]
    fn test_target_bare_id_and_name() {
        let matches = extract_times("3am for 123456789012345678");
        assert_eq!(matches[0].target, Some(TargetRef::Id(123456789012345678)));

        let matches = extract_times("3am for j.doe");
        assert_eq!(matches[0].target, Some(TargetRef::Name("j.doe".to_string())));
    }

    #[test]
    fn test_name_sheds_all_trailing_dots() {
        let matches = extract_times("3am for j..");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].target, Some(TargetRef::Name("j".to_string())));

        let matches = extract_times("3am for j.doe...");
        assert_eq!(matches[0].target, Some(TargetRef::Name("j.doe".to_string())));
    }

    #[test]
    fn test_unusable_for_clause_still_matches_time() {
        let matches = extract_times("6pm for ???");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].target, None);
    }

    #[test]
    fn test_match_cap() {
        let matches = extract_times("1pm or 2pm or 3pm or 4pm or 5pm");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[2].hour, 3);
    }

    #[test]
    fn test_noise_does_not_count_toward_cap() {
        // Two bare numbers, then three real times.
        let matches = extract_times("7 11 1pm 2pm 3pm");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].hour, 1);
    }

    #[test]
    fn test_no_match_mid_word() {
        assert!(extract_times("route66pm").is_empty());
    }

    #[test]
    fn test_chained_sentence() {
        let matches = extract_times("12pm my time or 3pm for <@111> or 5:45am for <@222>");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].hour, 12);
        assert_eq!(matches[0].target, None);
        assert_eq!(matches[1].target, Some(TargetRef::Mention(111)));
        assert_eq!(matches[2].minute, Some(45));
        assert_eq!(matches[2].target, Some(TargetRef::Mention(222)));
    }
}
