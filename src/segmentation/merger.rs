use crate::transcription::VoiceFragment;
use crate::video::scene::SceneBreak;

/// Where a scene break falls relative to one fragment's time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BreakPosition {
    /// The break lies entirely after the fragment.
    AfterFragment,
    /// The break lies strictly before the fragment starts.
    BeforeFragment,
    /// The break falls inside the fragment's span.
    WithinFragment,
}

fn classify(fragment: &VoiceFragment, break_time: f64) -> BreakPosition {
    if fragment.end_time < break_time {
        BreakPosition::AfterFragment
    } else if break_time < fragment.start_time {
        BreakPosition::BeforeFragment
    } else {
        BreakPosition::WithinFragment
    }
}

/// Decide paragraph boundaries by fusing silence gaps with camera cuts.
///
/// Mutates only `begins_paragraph`. The two rules are additive: a long pause
/// flags a fragment whatever the camera did, and a camera cut flags one even
/// when the speakers overlap without a pause. Flags are never cleared, so
/// merging is idempotent.
pub fn merge(fragments: &mut [VoiceFragment], breaks: &[SceneBreak], gap_threshold: f64) {
    if fragments.is_empty() {
        return;
    }
    fragments[0].begins_paragraph = true;
    apply_silence_rule(fragments, gap_threshold);
    apply_scene_rule(fragments, breaks);
}

/// Flag every fragment preceded by at least `gap_threshold` seconds of
/// silence. Fragments must be sorted ascending by time.
fn apply_silence_rule(fragments: &mut [VoiceFragment], gap_threshold: f64) {
    for i in 1..fragments.len() {
        if fragments[i].start_time - fragments[i - 1].end_time >= gap_threshold {
            fragments[i].begins_paragraph = true;
        }
    }
}

/// Walk fragments and scene breaks together with two monotone cursors.
///
/// A break between fragments flags the fragment that follows it. A break
/// inside a fragment's span is attributed by its nearer edge: a cut close to
/// the start likely opened this fragment's speaker, a cut close to the end is
/// likely cutting to the next one. Breaks past the last fragment reference
/// time with no transcript and are dropped.
fn apply_scene_rule(fragments: &mut [VoiceFragment], breaks: &[SceneBreak]) {
    let mut i = 0;
    let mut j = 0;
    while i < fragments.len() && j < breaks.len() {
        let break_time = breaks[j].time;
        match classify(&fragments[i], break_time) {
            BreakPosition::AfterFragment => {
                i += 1;
            }
            BreakPosition::BeforeFragment => {
                fragments[i].begins_paragraph = true;
                j += 1;
            }
            BreakPosition::WithinFragment => {
                let from_start = break_time - fragments[i].start_time;
                let from_end = fragments[i].end_time - break_time;
                if from_start < from_end {
                    fragments[i].begins_paragraph = true;
                } else if i + 1 < fragments.len() {
                    fragments[i + 1].begins_paragraph = true;
                }
                // The fragment stays current; it may absorb a later break.
                j += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragments(spans: &[(f64, f64)]) -> Vec<VoiceFragment> {
        spans
            .iter()
            .enumerate()
            .map(|(i, &(start, end))| VoiceFragment::new(format!("f{i}"), start, end))
            .collect()
    }

    fn breaks(times: &[f64]) -> Vec<SceneBreak> {
        times.iter().map(|&time| SceneBreak { time }).collect()
    }

    fn flags(fragments: &[VoiceFragment]) -> Vec<bool> {
        fragments.iter().map(|f| f.begins_paragraph).collect()
    }

    #[test]
    fn test_first_fragment_always_flagged() {
        let mut frags = fragments(&[(0.0, 1.0)]);
        merge(&mut frags, &[], 3.0);
        assert_eq!(flags(&frags), vec![true]);
    }

    #[test]
    fn test_small_gap_no_break() {
        // fragments (0,1)(1.2,2), no breaks: one paragraph.
        let mut frags = fragments(&[(0.0, 1.0), (1.2, 2.0)]);
        merge(&mut frags, &[], 3.0);
        assert_eq!(flags(&frags), vec![true, false]);
    }

    #[test]
    fn test_silence_gap_splits() {
        // gap of 4s >= threshold 3s.
        let mut frags = fragments(&[(0.0, 1.0), (5.0, 6.0)]);
        merge(&mut frags, &[], 3.0);
        assert_eq!(flags(&frags), vec![true, true]);
    }

    #[test]
    fn test_gap_exactly_at_threshold_splits() {
        let mut frags = fragments(&[(0.0, 1.0), (4.0, 5.0)]);
        merge(&mut frags, &[], 3.0);
        assert_eq!(flags(&frags), vec![true, true]);
    }

    #[test]
    fn test_in_span_break_near_end_flags_next() {
        // Break at 1.9 in (0,2): 1.9 from start, 0.1 from end.
        let mut frags = fragments(&[(0.0, 2.0), (2.0, 4.0)]);
        merge(&mut frags, &breaks(&[1.9]), 3.0);
        assert_eq!(flags(&frags), vec![true, true]);
    }

    #[test]
    fn test_in_span_break_near_start_flags_current() {
        let mut frags = fragments(&[(0.0, 1.0), (2.0, 10.0)]);
        merge(&mut frags, &breaks(&[2.5]), 30.0);
        assert_eq!(flags(&frags), vec![true, true]);
    }

    #[test]
    fn test_break_between_fragments_flags_follower() {
        let mut frags = fragments(&[(0.0, 1.0), (2.0, 3.0)]);
        merge(&mut frags, &breaks(&[1.5]), 30.0);
        assert_eq!(flags(&frags), vec![true, true]);
    }

    #[test]
    fn test_break_near_end_of_last_fragment_is_noop() {
        // Nearer the end but there is no next fragment.
        let mut frags = fragments(&[(0.0, 2.0)]);
        merge(&mut frags, &breaks(&[1.9]), 3.0);
        assert_eq!(flags(&frags), vec![true]);
    }

    #[test]
    fn test_breaks_past_last_fragment_discarded() {
        let mut frags = fragments(&[(0.0, 1.0), (1.0, 2.0)]);
        merge(&mut frags, &breaks(&[50.0, 60.0]), 3.0);
        assert_eq!(flags(&frags), vec![true, false]);
    }

    #[test]
    fn test_empty_break_set_equals_silence_only() {
        let spans = [(0.0, 1.0), (1.5, 2.0), (6.0, 7.0), (7.1, 9.0)];
        let mut with_empty = fragments(&spans);
        merge(&mut with_empty, &[], 3.0);

        let mut silence_only = fragments(&spans);
        silence_only[0].begins_paragraph = true;
        apply_silence_rule(&mut silence_only, 3.0);

        assert_eq!(flags(&with_empty), flags(&silence_only));
    }

    #[test]
    fn test_rules_are_additive() {
        // Fragment 1 flagged by silence, fragment 2 by scene.
        let mut frags = fragments(&[(0.0, 1.0), (5.0, 6.0), (6.2, 8.0)]);
        merge(&mut frags, &breaks(&[6.1]), 3.0);
        assert_eq!(flags(&frags), vec![true, true, true]);
    }

    #[test]
    fn test_multiple_breaks_in_one_fragment() {
        let mut frags = fragments(&[(0.0, 10.0), (10.0, 20.0)]);
        // One near the start, one near the end of fragment 0.
        merge(&mut frags, &breaks(&[1.0, 9.5]), 30.0);
        assert_eq!(flags(&frags), vec![true, true]);
    }

    #[test]
    fn test_idempotent() {
        let spans = [(0.0, 2.0), (2.0, 4.0), (9.0, 11.0)];
        let break_times = [1.9, 10.0];
        let mut first = fragments(&spans);
        merge(&mut first, &breaks(&break_times), 3.0);
        let after_first = flags(&first);

        merge(&mut first, &breaks(&break_times), 3.0);
        assert_eq!(flags(&first), after_first);
    }
}
