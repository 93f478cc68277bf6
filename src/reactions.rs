//! Like / dislike toggling.
//!
//! A note is in exactly one of three reaction states. Each toggle is a single
//! transition; switching from like to dislike (or back) clears the old
//! reaction and applies the new one in the same step.

use crate::models::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn toggled_message(self) -> &'static str {
        match self {
            Reaction::Like => "Note like toggled successfully!",
            Reaction::Dislike => "Note dislike toggled successfully!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionState {
    Neutral,
    Liked,
    Disliked,
}

impl ReactionState {
    pub fn of(note: &Note) -> Self {
        // A hand-edited document could carry both flags; like wins.
        if note.has_liked {
            ReactionState::Liked
        } else if note.has_disliked {
            ReactionState::Disliked
        } else {
            ReactionState::Neutral
        }
    }

    pub fn after(self, reaction: Reaction) -> Self {
        match (self, reaction) {
            (ReactionState::Liked, Reaction::Like) => ReactionState::Neutral,
            (ReactionState::Disliked, Reaction::Dislike) => ReactionState::Neutral,
            (_, Reaction::Like) => ReactionState::Liked,
            (_, Reaction::Dislike) => ReactionState::Disliked,
        }
    }
}

/// Apply `reaction` to `note`, adjusting counters and flags together.
pub fn toggle(note: &mut Note, reaction: Reaction) {
    let next = ReactionState::of(note).after(reaction);

    if note.has_liked && next != ReactionState::Liked {
        note.likes = note.likes.saturating_sub(1);
    }
    if note.has_disliked && next != ReactionState::Disliked {
        note.dislikes = note.dislikes.saturating_sub(1);
    }
    if !note.has_liked && next == ReactionState::Liked {
        note.likes = note.likes.saturating_add(1);
    }
    if !note.has_disliked && next == ReactionState::Disliked {
        note.dislikes = note.dislikes.saturating_add(1);
    }

    note.has_liked = next == ReactionState::Liked;
    note.has_disliked = next == ReactionState::Disliked;
}
