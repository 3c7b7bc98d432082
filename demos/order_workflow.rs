//! Parallel Order Fulfilment
//!
//! This example demonstrates an order that is picked and invoiced in
//! parallel, then shipped once both branches are done.
//!
//! Key concepts:
//! - Forks: one transition producing several states
//! - Joins: one transition consuming several states
//! - Guards reading the typed entity
//! - Vetoing listeners and history recording
//!
//! Run with: cargo run --example order_workflow

use multistate::access::FieldAccessor;
use multistate::{
    CallbackFilter, EventDispatcher, GraphBuilder, HistoryRecorder, Machine, MachineError, Signal,
    StateSet,
};
use std::sync::Arc;

struct Order {
    id: u64,
    state: StateSet,
    items: Vec<String>,
    paid: bool,
    on_hold: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Parallel Order Fulfilment ===\n");

    let graph = GraphBuilder::<Order>::new()
        .name("fulfilment")
        .states([
            "placed",
            "picking",
            "picked",
            "invoicing",
            "invoiced",
            "shipped",
        ])
        .transition("start", ["placed"], ["picking", "invoicing"])
        .transition("pick", ["picking"], ["picked"])
        .transition("invoice", ["invoicing"], ["invoiced"])
        .transition("ship", ["picked", "invoiced"], ["shipped"])
        .guard(CallbackFilter::new().on("start"), |event| {
            !event.entity().items.is_empty()
        })
        .guard(CallbackFilter::new().on("ship").from("invoiced"), |event| {
            event.entity().paid
        })
        .after(CallbackFilter::new().to("shipped"), |event| {
            println!("  order {} left the warehouse", event.entity().id);
            true
        })
        .build()?;

    let recorder = Arc::new(HistoryRecorder::new());
    let dispatcher = EventDispatcher::<Order>::new()
        .on(Signal::PreTransition, |event| {
            if event.entity().on_hold {
                println!("  '{}' vetoed: order on hold", event.transition_name());
                event.reject();
            }
        })
        .attach(recorder.clone());

    let accessor = FieldAccessor::new().field(
        "state",
        |o: &Order| &o.state,
        |o: &mut Order| &mut o.state,
    );

    let builder = Machine::builder()
        .graph(graph)
        .accessor(Arc::new(accessor))
        .notifier(Arc::new(dispatcher));

    let mut order = Order {
        id: 42,
        state: ["placed"].into_iter().collect(),
        items: vec!["kettle".to_string(), "mug".to_string()],
        paid: false,
        on_hold: false,
    };

    {
        let mut machine = builder.build(&mut order)?;
        println!("Initial state: {}", machine.get_state()?);

        machine.apply("start", false)?;
        println!("After start: {}", machine.get_state()?);

        machine.apply("pick", false)?;
        machine.apply("invoice", false)?;
        println!("Both branches done: {}", machine.get_state()?);

        // Unpaid orders cannot ship.
        match machine.apply("ship", false) {
            Err(MachineError::TransitionNotAllowed { states, .. }) => {
                println!("Cannot ship yet from {states}");
            }
            other => println!("Unexpected result: {other:?}"),
        }
    }

    order.paid = true;
    order.on_hold = true;
    {
        let mut machine = builder.build(&mut order)?;
        println!("Possible now: {:?}", machine.get_possible_transitions()?);
        println!("Applied: {}", machine.apply("ship", true)?);
    }

    order.on_hold = false;
    {
        let mut machine = builder.build(&mut order)?;
        println!("Applied: {}", machine.apply("ship", true)?);
        println!("Final state: {}", machine.get_state()?);
    }

    println!("\nHistory:");
    for record in recorder.history().transitions() {
        println!("  {}: {} -> {}", record.transition, record.from, record.to);
    }

    Ok(())
}
