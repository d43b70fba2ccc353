// menu.rs — The interactive menu loop.
//
// One blocking read per choice, one tracker operation per choice, then
// back to the menu. No failure here is fatal: tracker errors and store
// errors are printed and the loop regains control. Ctrl-C/Ctrl-D at the
// menu exits; inside an operation it cancels back to the menu.

use std::path::{Path, PathBuf};

use quest_goal::{EventOutcome, Goal, GoalFile, GoalTracker, QuestError};

use crate::input::Prompt;

const MENU: &str = "\nMenu:\n\
    \x20 1. Add goal\n\
    \x20 2. Record event\n\
    \x20 3. Edit goal\n\
    \x20 4. Delete goal\n\
    \x20 5. List goals\n\
    \x20 6. Show history\n\
    \x20 7. Show score\n\
    \x20 8. Save goals\n\
    \x20 9. Load goals\n\
    \x20 0. Exit";

/// Run the menu loop until the user exits.
pub fn run(tracker: &mut GoalTracker, default_file: &Path) -> anyhow::Result<()> {
    let mut prompt = Prompt::new()?;

    loop {
        println!("{MENU}");
        let Some(choice) = prompt.line("Select an option: ")? else {
            println!("Goodbye!");
            return Ok(());
        };

        match choice.as_str() {
            "1" => add_goal(&mut prompt, tracker)?,
            "2" => record_event(&mut prompt, tracker)?,
            "3" => edit_goal(&mut prompt, tracker)?,
            "4" => delete_goal(&mut prompt, tracker)?,
            "5" => list_goals(tracker),
            "6" => show_history(tracker),
            "7" => println!("Total points: {}", tracker.total_score()),
            "8" => save_goals(&mut prompt, tracker, default_file)?,
            "9" => load_goals(&mut prompt, tracker, default_file)?,
            "0" | "exit" | "quit" => {
                println!("Goodbye!");
                return Ok(());
            }
            other => println!("Unknown option {other:?}. Please try again."),
        }
    }
}

fn add_goal(prompt: &mut Prompt, tracker: &mut GoalTracker) -> anyhow::Result<()> {
    let Some(name) = prompt.required_line("Goal name: ")? else {
        return Ok(());
    };
    let Some(points) = prompt.points("Points: ")? else {
        return Ok(());
    };
    let Some(category) = prompt.required_line("Category: ")? else {
        return Ok(());
    };
    let Some(priority) = prompt.priority("Priority (high/medium/low): ")? else {
        return Ok(());
    };

    println!("Goal type:\n  1. Simple\n  2. Eternal\n  3. Checklist");
    let Some(kind) = prompt.line("Select a type: ")? else {
        return Ok(());
    };

    let goal = match kind.as_str() {
        "1" | "simple" => Goal::simple(name, points, category, priority),
        "2" | "eternal" => Goal::eternal(name, points, category, priority),
        "3" | "checklist" => {
            let Some(required) = prompt.required_times("How many completions are required? ")?
            else {
                return Ok(());
            };
            match Goal::checklist(name, points, category, priority, required) {
                Ok(goal) => goal,
                Err(err) => {
                    println!("{err}");
                    return Ok(());
                }
            }
        }
        other => {
            println!("Unknown goal type {other:?}. Goal not added.");
            return Ok(());
        }
    };

    println!("'{}' has been added to your goals.", goal.name);
    tracker.add_goal(goal);
    Ok(())
}

fn record_event(prompt: &mut Prompt, tracker: &mut GoalTracker) -> anyhow::Result<()> {
    if tracker.is_empty() {
        println!("No goals yet. Add one first.");
        return Ok(());
    }
    list_goals(tracker);

    let Some(index) = prompt.goal_number("Goal number to record: ")? else {
        return Ok(());
    };
    match tracker.record_event(index) {
        Ok(record) => {
            match record.outcome {
                EventOutcome::Completed => println!(
                    "'{}' completed! You earned {} points.",
                    record.goal_name, record.points_awarded
                ),
                EventOutcome::Halfway => println!(
                    "'{}' recorded — halfway there! You earned {} points.",
                    record.goal_name, record.points_awarded
                ),
                EventOutcome::Recorded => println!(
                    "'{}' recorded! You earned {} points.",
                    record.goal_name, record.points_awarded
                ),
                EventOutcome::AlreadyComplete => {
                    println!("'{}' is already completed.", record.goal_name)
                }
            }
            println!("Total points: {}", tracker.total_score());
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn edit_goal(prompt: &mut Prompt, tracker: &mut GoalTracker) -> anyhow::Result<()> {
    if tracker.is_empty() {
        println!("No goals yet. Add one first.");
        return Ok(());
    }
    list_goals(tracker);

    let Some(index) = prompt.goal_number("Goal number to edit: ")? else {
        return Ok(());
    };
    // Bounds-check up front so the user is not prompted for fields
    // that can never be applied.
    if tracker.goal(index).is_none() {
        println!(
            "{}",
            QuestError::Index {
                index,
                len: tracker.len()
            }
        );
        return Ok(());
    }

    let Some(name) = prompt.required_line("New name: ")? else {
        return Ok(());
    };
    let Some(points) = prompt.points("New points: ")? else {
        return Ok(());
    };
    let Some(category) = prompt.required_line("New category: ")? else {
        return Ok(());
    };
    let Some(priority) = prompt.priority("New priority (high/medium/low): ")? else {
        return Ok(());
    };

    match tracker.edit_goal(index, name, points, category, priority) {
        Ok(()) => println!("Goal updated."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn delete_goal(prompt: &mut Prompt, tracker: &mut GoalTracker) -> anyhow::Result<()> {
    if tracker.is_empty() {
        println!("No goals yet. Add one first.");
        return Ok(());
    }
    list_goals(tracker);

    let Some(index) = prompt.goal_number("Goal number to delete: ")? else {
        return Ok(());
    };
    match tracker.delete_goal(index) {
        Ok(goal) => println!("'{}' has been deleted from your goals.", goal.name),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn list_goals(tracker: &GoalTracker) {
    if tracker.is_empty() {
        println!("No goals yet.");
        return;
    }
    println!("Your goals:");
    for (category, members) in tracker.goals_by_category() {
        println!("[{category}]");
        for (index, goal) in members {
            println!("  {}. {}", index + 1, goal);
        }
    }
}

fn show_history(tracker: &GoalTracker) {
    if tracker.history().is_empty() {
        println!("No events recorded this session.");
        return;
    }
    println!("Goal history:");
    for entry in tracker.history() {
        println!("  {entry}");
    }
}

fn save_goals(
    prompt: &mut Prompt,
    tracker: &GoalTracker,
    default_file: &Path,
) -> anyhow::Result<()> {
    let Some(path) = snapshot_path(prompt, default_file)? else {
        return Ok(());
    };
    let file = GoalFile::new(&path);
    match file.save(tracker) {
        Ok(()) => println!("Goals saved to {}.", path.display()),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn load_goals(
    prompt: &mut Prompt,
    tracker: &mut GoalTracker,
    default_file: &Path,
) -> anyhow::Result<()> {
    let Some(path) = snapshot_path(prompt, default_file)? else {
        return Ok(());
    };
    let file = GoalFile::new(&path);
    match file.load() {
        Ok(snapshot) => {
            if snapshot.skipped > 0 {
                println!("Skipped {} malformed record(s).", snapshot.skipped);
            }
            println!(
                "Loaded {} goal(s) from {}.",
                snapshot.tracker.len(),
                path.display()
            );
            *tracker = snapshot.tracker;
        }
        // Missing file is not fatal — keep the current goals.
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn snapshot_path(prompt: &mut Prompt, default_file: &Path) -> anyhow::Result<Option<PathBuf>> {
    let Some(answer) = prompt.line(&format!("Filename [{}]: ", default_file.display()))? else {
        return Ok(None);
    };
    Ok(Some(if answer.is_empty() {
        default_file.to_path_buf()
    } else {
        PathBuf::from(answer)
    }))
}
