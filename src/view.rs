use crate::catalog::Catalog;
use crate::models::CourseRecord;
use crate::selection::SelectionState;

pub const NO_SELECTION_PLACEHOLDER: &str = "No selected courses yet.";

/// Renders both course buckets, the pending credit total and whether
/// submission is currently possible.
pub fn render(catalog: &Catalog, selection: &SelectionState) -> String {
    let is_confirmed = |c: &CourseRecord| c.id.is_some_and(|id| selection.is_confirmed(id));
    let mut lines = Vec::new();

    lines.push("================== Available courses ==================".to_string());
    for course in catalog.records().iter().filter(|c| !is_confirmed(*c)) {
        let marker = if course.id.is_some_and(|id| selection.is_pending(id)) {
            "[x]"
        } else {
            "[ ]"
        };
        lines.push(format!("{} {}", marker, course_line(course)));
    }

    lines.push("================== Selected courses ===================".to_string());
    let confirmed: Vec<&CourseRecord> = catalog.records().iter().filter(|c| is_confirmed(*c)).collect();
    if confirmed.is_empty() {
        lines.push(NO_SELECTION_PLACEHOLDER.to_string());
    } else {
        lines.extend(confirmed.into_iter().map(|c| format!("    {}", course_line(c))));
    }

    lines.push("=======================================================".to_string());
    lines.push(format!("Total credits: {}", selection.pending_credit_total(catalog)));
    lines.push(format!(
        "Confirm: {}",
        if selection.confirm_enabled() { "enabled" } else { "disabled" }
    ));

    lines.join("\n")
}

fn course_line(course: &CourseRecord) -> String {
    let id = course
        .id
        .map_or_else(|| "-".to_string(), |id| id.to_string());
    format!(
        "#{:<5}{:<30}Course Type : {:<12}Credit: {}",
        id,
        course.name,
        course.kind(),
        course.credit
    )
}
