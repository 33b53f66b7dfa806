use super::*;
use crate::test_support::{Rig, SCENARIO_SPAWN, scenario_pit};
use crate::types::Pos;

fn actor_at(pos: Pos) -> Actor {
    Actor::new(Hero::new(pos), ActorConfig::default())
}

#[test]
fn idle_tick_plans_without_moving() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(SCENARIO_SPAWN);

    let outcome = actor.tick(&mut rig.services()).expect("plan");
    assert_eq!(
        outcome,
        TickOutcome::Planned { goal: Some(Predicate::InsideArena), action: ActionName::EnterArena }
    );
    assert_eq!(actor.state(), ActorState::PerformAction);
    assert_eq!(actor.hero().pos(), SCENARIO_SPAWN);
    assert_eq!(actor.current_action(), Some(ActionName::EnterArena));
}

#[test]
fn completion_returns_to_idle_and_replans_next_tick() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(SCENARIO_SPAWN);

    actor.tick(&mut rig.services()).expect("plan");
    let outcome = actor.tick(&mut rig.services()).expect("enter");
    assert_eq!(outcome, TickOutcome::Completed { action: ActionName::EnterArena });
    assert_eq!(actor.state(), ActorState::Idle);
    assert_eq!(actor.current_action(), None);

    let outcome = actor.tick(&mut rig.services()).expect("replan");
    assert_eq!(
        outcome,
        TickOutcome::Planned {
            goal: Some(Predicate::ExploredArena),
            action: ActionName::ExploreArena
        }
    );
}

#[test]
fn in_progress_ticks_do_not_replan() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(Pos { y: 6, x: 2 });
    actor.hero.cycle_mut().mark_entered_arena();

    actor.tick(&mut rig.services()).expect("plan");
    let planned = actor.log().len();
    let outcome = actor.tick(&mut rig.services()).expect("explore step");
    assert_eq!(outcome, TickOutcome::InProgress { action: ActionName::ExploreArena });
    assert_eq!(actor.log().len(), planned);
}

#[test]
fn perform_without_an_action_fails_fast_and_recovers_to_idle() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(SCENARIO_SPAWN);
    actor.state = ActorState::PerformAction;

    let err = actor.tick(&mut rig.services()).expect_err("no current action");
    assert_eq!(err, ActorError::NoCurrentAction);
    assert_eq!(actor.state(), ActorState::Idle);
    assert!(actor.tick(&mut rig.services()).is_ok());
}

#[test]
fn despawn_discards_the_in_flight_action() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(SCENARIO_SPAWN);
    actor.tick(&mut rig.services()).expect("plan");
    assert_eq!(actor.current_action(), Some(ActionName::EnterArena));

    let hero = actor.despawn();
    assert_eq!(hero.pos(), SCENARIO_SPAWN, "the action never got its step");
    assert_eq!(hero.steps_taken(), 0);
}

#[test]
fn snapshot_hash_tracks_progress() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(SCENARIO_SPAWN);
    let before = actor.snapshot_hash();
    assert_eq!(before, actor_at(SCENARIO_SPAWN).snapshot_hash());

    actor.tick(&mut rig.services()).expect("plan");
    assert_ne!(actor.snapshot_hash(), before);
}

#[test]
fn event_log_brackets_every_action() {
    let mut rig = Rig::new(scenario_pit());
    let mut actor = actor_at(SCENARIO_SPAWN);
    actor.tick(&mut rig.services()).expect("plan");
    actor.tick(&mut rig.services()).expect("enter");

    assert_eq!(
        actor.log(),
        &[
            ActorEvent::GoalSelected { tick: 0, goal: Some(Predicate::InsideArena) },
            ActorEvent::ActionStarted { tick: 0, action: ActionName::EnterArena },
            ActorEvent::ActionCompleted { tick: 1, action: ActionName::EnterArena },
        ]
    );
}
