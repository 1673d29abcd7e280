//! Line-definition parser.
//!
//! Reads the plain-text definition format:
//!
//! ```text
//! 3            <- task count n
//! 1,5.0        <- n task lines: "id,duration" ...
//! 5.0          <- ... or a bare duration (id = 1-based position)
//! 2,5.0
//! 1,3          <- precedence pairs: "predecessor_id,task_id"
//! -1,-1        <- sentinel: no relation, line ignored
//! ```
//!
//! One station per task (ids `1..=n`) is produced for the naive case.
//! Any reference to an unknown task id, malformed count, or
//! unparsable numeric field is a fatal [`Error::Parse`] carrying the
//! 1-based source line.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::{Station, Task, TaskId};

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

/// Parses a line definition from a reader.
///
/// Returns the task batch (with predecessors resolved) and the
/// matching station batch.
pub fn parse_definition<R: BufRead>(reader: R) -> Result<(Vec<Task>, Vec<Station>)> {
    // Keep the source line number next to each non-empty line so
    // errors point at the source.
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push((index + 1, trimmed.to_string()));
        }
    }

    let Some(&(count_line, ref count_text)) = lines.first() else {
        return Err(parse_error(1, "definition is empty"));
    };
    let task_count: usize = count_text
        .parse()
        .map_err(|_| parse_error(count_line, format!("invalid task count {count_text:?}")))?;

    if lines.len() < task_count + 1 {
        return Err(parse_error(
            count_line,
            format!(
                "expected {task_count} task lines, found {}",
                lines.len() - 1
            ),
        ));
    }

    let mut tasks = Vec::with_capacity(task_count);
    let mut index: BTreeMap<TaskId, usize> = BTreeMap::new();

    for (position, &(line_no, ref text)) in lines[1..=task_count].iter().enumerate() {
        let task = parse_task_line(line_no, position, text)?;
        if index.insert(task.id, position).is_some() {
            return Err(parse_error(line_no, format!("duplicate task id {}", task.id)));
        }
        tasks.push(task);
    }

    for &(line_no, ref text) in &lines[task_count + 1..] {
        apply_precedence_line(line_no, text, &mut tasks, &index)?;
    }

    let stations = (1..=task_count as u32).map(Station::new).collect();
    Ok((tasks, stations))
}

/// Parses a line definition from a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<(Vec<Task>, Vec<Station>)> {
    let file = File::open(path)?;
    parse_definition(BufReader::new(file))
}

fn parse_task_line(line_no: usize, position: usize, text: &str) -> Result<Task> {
    let parts: Vec<&str> = text.split(',').collect();
    match parts.as_slice() {
        [id, duration] => {
            let id: TaskId = id
                .trim()
                .parse()
                .map_err(|_| parse_error(line_no, format!("invalid task id {id:?}")))?;
            let duration = parse_duration(line_no, duration)?;
            Ok(Task::new(id, duration))
        }
        [duration] => {
            let duration = parse_duration(line_no, duration)?;
            Ok(Task::new(position as TaskId + 1, duration))
        }
        _ => Err(parse_error(
            line_no,
            format!("expected \"id,duration\" or a bare duration, found {text:?}"),
        )),
    }
}

fn parse_duration(line_no: usize, text: &str) -> Result<f64> {
    let duration: f64 = text
        .trim()
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid task duration {text:?}")))?;
    if duration < 0.0 {
        return Err(parse_error(
            line_no,
            format!("negative task duration {duration}"),
        ));
    }
    Ok(duration)
}

fn apply_precedence_line(
    line_no: usize,
    text: &str,
    tasks: &mut [Task],
    index: &BTreeMap<TaskId, usize>,
) -> Result<()> {
    let parts: Vec<&str> = text.split(',').collect();
    let [pred, task] = parts.as_slice() else {
        return Err(parse_error(
            line_no,
            format!("expected \"predecessor_id,task_id\", found {text:?}"),
        ));
    };

    let pred: i64 = pred
        .trim()
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid predecessor id {pred:?}")))?;
    let task: i64 = task
        .trim()
        .parse()
        .map_err(|_| parse_error(line_no, format!("invalid task id {task:?}")))?;

    // Sentinel: no predecessor relation on this line.
    if pred == -1 && task == -1 {
        return Ok(());
    }

    let pred_id = TaskId::try_from(pred)
        .map_err(|_| parse_error(line_no, format!("invalid predecessor id {pred}")))?;
    let task_id = TaskId::try_from(task)
        .map_err(|_| parse_error(line_no, format!("invalid task id {task}")))?;

    if !index.contains_key(&pred_id) {
        return Err(parse_error(
            line_no,
            format!("predecessor references unknown task {pred_id}"),
        ));
    }
    let Some(&position) = index.get(&task_id) else {
        return Err(parse_error(
            line_no,
            format!("precedence references unknown task {task_id}"),
        ));
    };

    tasks[position].add_predecessor(pred_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> Result<(Vec<Task>, Vec<Station>)> {
        parse_definition(text.as_bytes())
    }

    #[test]
    fn test_bare_duration_form() {
        let (tasks, stations) = parse("3\n5.0\n4.0\n3.0\n").unwrap();

        let ids: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(tasks[1].duration(), 4.0);
        assert_eq!(stations.len(), 3);
        assert_eq!(stations[2].id, 3);
    }

    #[test]
    fn test_id_duration_form() {
        let (tasks, _) = parse("2\n10,1.5\n20,2.5\n").unwrap();
        assert_eq!(tasks[0].id, 10);
        assert_eq!(tasks[0].duration(), 1.5);
        assert_eq!(tasks[1].id, 20);
        assert_eq!(tasks[1].duration(), 2.5);
    }

    #[test]
    fn test_precedence_pairs_and_sentinel() {
        let (tasks, _) = parse("3\n5.0\n4.0\n3.0\n1,2\n-1,-1\n2,3\n").unwrap();

        assert!(tasks[1].has_predecessor(1));
        assert!(tasks[2].has_predecessor(2));
        assert_eq!(tasks[0].predecessor_count(), 0);
    }

    #[test]
    fn test_duplicate_precedence_is_noop() {
        let (tasks, _) = parse("2\n5.0\n4.0\n1,2\n1,2\n").unwrap();
        assert_eq!(tasks[1].predecessor_count(), 1);
    }

    #[test]
    fn test_empty_input() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_invalid_count() {
        let err = parse("three\n5.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_missing_task_lines() {
        let err = parse("3\n5.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_invalid_duration() {
        let err = parse("1\nfast\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_negative_duration() {
        let err = parse("1\n-2.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_duplicate_task_id() {
        let err = parse("2\n7,1.0\n7,2.0\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_unknown_predecessor_id() {
        let err = parse("2\n5.0\n4.0\n9,2\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, .. }));
    }

    #[test]
    fn test_unknown_task_id_in_pair() {
        let err = parse("2\n5.0\n4.0\n1,9\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, .. }));
    }

    #[test]
    fn test_malformed_pair() {
        let err = parse("1\n5.0\n1,2,3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let (tasks, _) = parse("2\n\n5.0\n4.0\n\n1,2\n").unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks[1].has_predecessor(1));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "2\n5.0\n4.0\n1,2\n").unwrap();

        let (tasks, stations) = parse_file(file.path()).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(stations.len(), 2);
        assert!(tasks[1].has_predecessor(1));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/definitely/not/here.in2").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
