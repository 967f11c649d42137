//! Resolution scenarios over a small numeric type hierarchy

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use sqlmeta_dispatch::{DispatchError, Dispatcher, MethodTable, TypeHierarchy};
use std::any::{Any, TypeId};
use std::sync::Arc;

// Object <- Number <- {Int, Long, BigDecimal <- AmbiguousNumber}
// Crunchable and Fudgeable are marker interfaces implemented by AmbiguousNumber.
trait Object {}
trait Number {}
trait Crunchable {}
trait Fudgeable {}

#[derive(Debug)]
struct Int(i32);
#[derive(Debug)]
struct Long(i64);
#[derive(Debug)]
struct BigDecimal;
#[derive(Debug)]
struct AmbiguousNumber;
#[derive(Debug)]
struct Text;

type NegateFn = fn(&dyn Any) -> Option<i64>;

fn negate_int(value: &dyn Any) -> Option<i64> {
    value.downcast_ref::<Int>().map(|i| -i64::from(i.0))
}

fn negate_number(value: &dyn Any) -> Option<i64> {
    value.downcast_ref::<Long>().map(|l| -l.0)
}

fn negate_object(_: &dyn Any) -> Option<i64> {
    Some(0)
}

fn unreachable_handler(_: &dyn Any) -> Option<i64> {
    None
}

#[fixture]
fn dispatcher() -> Dispatcher {
    let h = TypeHierarchy::new();
    h.declare::<dyn Object>("Object", &[]).unwrap();
    h.declare::<dyn Number>("Number", &[TypeId::of::<dyn Object>()]).unwrap();
    h.declare::<dyn Crunchable>("Crunchable", &[]).unwrap();
    h.declare::<dyn Fudgeable>("Fudgeable", &[]).unwrap();
    h.declare::<Int>("Int", &[TypeId::of::<dyn Number>()]).unwrap();
    h.declare::<Long>("Long", &[TypeId::of::<dyn Number>()]).unwrap();
    h.declare::<BigDecimal>("BigDecimal", &[TypeId::of::<dyn Number>()]).unwrap();
    h.declare::<AmbiguousNumber>(
        "AmbiguousNumber",
        &[
            TypeId::of::<BigDecimal>(),
            TypeId::of::<dyn Crunchable>(),
            TypeId::of::<dyn Fudgeable>(),
        ],
    )
    .unwrap();
    h.declare::<Text>("Text", &[TypeId::of::<dyn Object>()]).unwrap();
    Dispatcher::new(Arc::new(h))
}

fn careful_negater() -> MethodTable<NegateFn> {
    MethodTable::builder()
        .handler("negate", TypeId::of::<Int>(), negate_int as NegateFn)
        .handler("negate", TypeId::of::<dyn Number>(), negate_number as NegateFn)
        .build()
        .unwrap()
}

fn number_root() -> TypeId {
    TypeId::of::<dyn Number>()
}

#[rstest]
fn exact_match_preferred(dispatcher: Dispatcher) {
    let table = careful_negater();
    let negate = dispatcher
        .dispatch(&table, "negate", number_root(), &Int(5))
        .unwrap();
    assert_eq!(negate(&Int(5)), Some(-5));
}

#[rstest]
fn falls_back_to_ancestor_handler(dispatcher: Dispatcher) {
    let table = careful_negater();
    let negate = dispatcher
        .dispatch(&table, "negate", number_root(), &Long(7))
        .unwrap();
    assert_eq!(negate(&Long(7)), Some(-7));
}

#[rstest]
fn handlers_above_root_are_ignored(dispatcher: Dispatcher) {
    let clueless = MethodTable::builder()
        .handler("negate", TypeId::of::<dyn Object>(), negate_object as NegateFn)
        .build()
        .unwrap();

    let result = dispatcher.dispatch(&clueless, "negate", number_root(), &Int(5));
    assert!(matches!(result, Err(DispatchError::NotFound { .. })));
}

#[rstest]
fn root_itself_is_eligible(dispatcher: Dispatcher) {
    let clueless = MethodTable::builder()
        .handler("negate", TypeId::of::<dyn Object>(), negate_object as NegateFn)
        .build()
        .unwrap();

    let negate = dispatcher
        .dispatch(&clueless, "negate", TypeId::of::<dyn Object>(), &Int(5))
        .unwrap();
    assert_eq!(negate(&Int(5)), Some(0));
}

#[rstest]
fn interfaces_tie_into_ambiguity(dispatcher: Dispatcher) {
    let table = MethodTable::builder()
        .handler("negate", TypeId::of::<dyn Crunchable>(), unreachable_handler as NegateFn)
        .handler("negate", TypeId::of::<dyn Fudgeable>(), unreachable_handler as NegateFn)
        .handler("negate", TypeId::of::<dyn Number>(), negate_number as NegateFn)
        .build()
        .unwrap();

    let err = dispatcher
        .dispatch(&table, "negate", number_root(), &AmbiguousNumber)
        .unwrap_err();
    assert!(err.to_string().contains("ambiguity"));
    match err {
        DispatchError::Ambiguous { mut candidates, .. } => {
            candidates.sort();
            assert_eq!(candidates, vec!["Crunchable".to_string(), "Fudgeable".to_string()]);
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
    assert_eq!(dispatcher.cached_resolutions(), 0);
}

#[rstest]
fn closer_class_beats_interfaces(dispatcher: Dispatcher) {
    let table = MethodTable::builder()
        .handler("negate", TypeId::of::<dyn Crunchable>(), unreachable_handler as NegateFn)
        .handler("negate", TypeId::of::<AmbiguousNumber>(), negate_object as NegateFn)
        .build()
        .unwrap();

    let resolved = dispatcher
        .resolve(&table, "negate", number_root(), &AmbiguousNumber)
        .unwrap();
    assert_eq!(resolved.param, TypeId::of::<AmbiguousNumber>());
}

#[rstest]
fn argument_outside_root_not_found(dispatcher: Dispatcher) {
    let table = careful_negater();
    let result = dispatcher.dispatch(&table, "negate", number_root(), &Text);
    assert!(matches!(result, Err(DispatchError::NotFound { .. })));
}

#[rstest]
fn undeclared_argument_not_found(dispatcher: Dispatcher) {
    let table = careful_negater();
    let result = dispatcher.dispatch(&table, "negate", number_root(), &3u8);
    assert!(matches!(result, Err(DispatchError::NotFound { .. })));
}

#[rstest]
fn repeated_lookups_hit_cache(dispatcher: Dispatcher) {
    let table = careful_negater();
    for _ in 0..3 {
        dispatcher
            .dispatch(&table, "negate", number_root(), &Long(1))
            .unwrap();
    }
    dispatcher
        .dispatch(&table, "negate", number_root(), &Int(1))
        .unwrap();
    assert_eq!(dispatcher.cached_resolutions(), 2);
}

#[test]
fn diamond_is_ambiguous() {
    trait Top {}
    struct Left;
    struct Right;
    struct Bottom;

    let h = TypeHierarchy::new();
    h.declare::<dyn Top>("Top", &[]).unwrap();
    h.declare::<Left>("Left", &[TypeId::of::<dyn Top>()]).unwrap();
    h.declare::<Right>("Right", &[TypeId::of::<dyn Top>()]).unwrap();
    h.declare::<Bottom>("Bottom", &[TypeId::of::<Left>(), TypeId::of::<Right>()])
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(h));

    let table = MethodTable::builder()
        .handler("visit", TypeId::of::<Left>(), 1)
        .handler("visit", TypeId::of::<Right>(), 2)
        .handler("visit", TypeId::of::<dyn Top>(), 3)
        .build()
        .unwrap();

    let result = dispatcher.resolve(&table, "visit", TypeId::of::<dyn Top>(), &Bottom);
    assert!(matches!(result, Err(DispatchError::Ambiguous { .. })));
}

#[test]
fn shortcut_parent_is_dropped_from_tie() {
    trait Top {}
    struct Middle;
    struct Leaf;

    // Leaf extends both Middle and Top directly; Middle is the more specific.
    let h = TypeHierarchy::new();
    h.declare::<dyn Top>("Top", &[]).unwrap();
    h.declare::<Middle>("Middle", &[TypeId::of::<dyn Top>()]).unwrap();
    h.declare::<Leaf>("Leaf", &[TypeId::of::<Middle>(), TypeId::of::<dyn Top>()])
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::new(h));

    let table = MethodTable::builder()
        .handler("visit", TypeId::of::<dyn Top>(), "top")
        .handler("visit", TypeId::of::<Middle>(), "middle")
        .build()
        .unwrap();

    let visit = dispatcher
        .dispatch(&table, "visit", TypeId::of::<dyn Top>(), &Leaf)
        .unwrap();
    assert_eq!(*visit, "middle");
}

#[rstest]
fn concurrent_resolution_shares_one_cache(dispatcher: Dispatcher) {
    let table = careful_negater();
    let arguments = [TypeId::of::<Int>(), TypeId::of::<Long>()];

    let resolved: Vec<_> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|i| {
                let (dispatcher, table) = (&dispatcher, &table);
                let argument = arguments[i % arguments.len()];
                scope.spawn(move || {
                    let handler = dispatcher
                        .lookup(table, "negate", number_root(), argument)
                        .unwrap();
                    (argument, handler)
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for argument in arguments {
        let expected = dispatcher
            .lookup(&table, "negate", number_root(), argument)
            .unwrap();
        assert!(
            resolved
                .iter()
                .filter(|(arg, _)| *arg == argument)
                .all(|(_, handler)| *handler == expected)
        );
    }
    assert_eq!(
        resolved[0].1.param,
        TypeId::of::<Int>(),
        "Int resolves to its own handler"
    );
    assert_eq!(resolved[1].1.param, number_root());
    assert_eq!(dispatcher.cached_resolutions(), arguments.len());
}
