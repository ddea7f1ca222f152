//! Rule-based routine generation.
//!
//! Builds the morning and evening step lists from a skin type and a set of
//! concerns. Steps are appended in a fixed sequence and numbered as they go,
//! so the same inputs always produce the same list.

use std::collections::BTreeSet;

use crate::clock::Clock;
use crate::profile::{SkinConcern, SkinType};

use super::model::{ProductType, Routine, RoutineStep, TimeOfDay};

/// Countdown attached to the weekly mask step (10 minutes).
pub const MASK_TIMER_SECS: u32 = 600;

/// Accumulates steps and hands out consecutive order numbers.
struct StepList {
    steps: Vec<RoutineStep>,
}

impl StepList {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn next_order(&self) -> u32 {
        self.steps.len() as u32 + 1
    }

    fn push(&mut self, product_type: ProductType, name: &str, instructions: &str) {
        let step = RoutineStep::new(product_type, name, instructions, self.next_order());
        self.steps.push(step);
    }

    fn push_timed(
        &mut self,
        product_type: ProductType,
        name: &str,
        instructions: &str,
        seconds: u32,
    ) {
        let step = RoutineStep::new(product_type, name, instructions, self.next_order())
            .with_timer(seconds);
        self.steps.push(step);
    }
}

/// Generate the ordered steps for one time of day.
pub fn generate_steps(
    skin_type: SkinType,
    time_of_day: TimeOfDay,
    concerns: &BTreeSet<SkinConcern>,
) -> Vec<RoutineStep> {
    let mut list = StepList::new();

    match time_of_day {
        TimeOfDay::Morning => list.push(
            ProductType::Cleanser,
            "Gentle Cleanser",
            "Wash with warm water, apply the product with gentle movements, then rinse.",
        ),
        TimeOfDay::Evening => list.push(
            ProductType::Cleanser,
            "Cleanser",
            "Remove makeup first, then cleanse. Double cleanse if you wore makeup today.",
        ),
    };

    list.push(
        ProductType::Toner,
        "Toner",
        "Apply toner to a cotton pad or your palms and press it into the skin. Don't rub.",
    );

    match time_of_day {
        TimeOfDay::Morning => morning_steps(&mut list, skin_type, concerns),
        TimeOfDay::Evening => evening_steps(&mut list, skin_type, concerns),
    }

    list.steps
}

fn morning_steps(list: &mut StepList, skin_type: SkinType, concerns: &BTreeSet<SkinConcern>) {
    if concerns.contains(&SkinConcern::Pigmentation) || concerns.contains(&SkinConcern::Wrinkles) {
        list.push(
            ProductType::Serum,
            "Vitamin C Serum",
            "Apply 2-3 drops, avoiding the eye area, and pat in with your fingertips.",
        );
    }

    let moisturizer = if skin_type == SkinType::Oily {
        "Light Moisturizer"
    } else {
        "Moisturizer"
    };
    list.push(
        ProductType::Moisturizer,
        moisturizer,
        "Spread the cream over the whole face and neck with gentle movements.",
    );

    list.push(
        ProductType::Sunscreen,
        "Sunscreen SPF 30+",
        "MANDATORY STEP! Use about 1/4 teaspoon for face and neck and wait 15 minutes \
         before going out in the sun.",
    );
}

fn evening_steps(list: &mut StepList, skin_type: SkinType, concerns: &BTreeSet<SkinConcern>) {
    if concerns.contains(&SkinConcern::Acne) {
        list.push(
            ProductType::Treatment,
            "Salicylic Acid Treatment",
            "Spot-treat problem areas or apply a thin layer to the whole face. \
             Start at 2-3 evenings a week.",
        );
    }

    if concerns.contains(&SkinConcern::Wrinkles) {
        list.push(
            ProductType::Serum,
            "Retinol Serum",
            "Apply to dry skin, avoiding the eye area. \
             Start at 2-3 evenings a week and build up slowly.",
        );
    }

    if concerns.contains(&SkinConcern::Dehydration) || skin_type == SkinType::Dry {
        list.push(
            ProductType::Moisturizer,
            "Nourishing Night Cream",
            "Apply a thicker layer before bed. A few drops of facial oil can be mixed in.",
        );
    } else {
        list.push(
            ProductType::Moisturizer,
            "Moisturizer",
            "Spread the cream over the whole face and neck.",
        );
    }

    if concerns.contains(&SkinConcern::EnlargedPores) || skin_type == SkinType::Oily {
        list.push_timed(
            ProductType::Mask,
            "Cleansing Mask",
            "Use 1-2 times a week. Leave on for 10-15 minutes, then rinse with warm water.",
            MASK_TIMER_SECS,
        );
    }
}

/// Generate a fresh, uncompleted routine scheduled at `clock.now()`.
pub fn generate(
    skin_type: SkinType,
    time_of_day: TimeOfDay,
    concerns: &BTreeSet<SkinConcern>,
    clock: &dyn Clock,
) -> Routine {
    let steps = generate_steps(skin_type, time_of_day, concerns);
    tracing::debug!(%skin_type, %time_of_day, steps = steps.len(), "Generated routine");
    Routine::new(time_of_day, steps, clock.now())
}
