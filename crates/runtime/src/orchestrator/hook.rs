use combat_core::ActorId;

/// Receives defeats so loot and experience can be handed out elsewhere.
pub trait RewardHook {
    fn on_defeat(&mut self, defeated: ActorId, victor: ActorId);
}

impl<F> RewardHook for F
where
    F: FnMut(ActorId, ActorId),
{
    fn on_defeat(&mut self, defeated: ActorId, victor: ActorId) {
        self(defeated, victor)
    }
}
