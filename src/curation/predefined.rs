//! Built-in label lists for the academic-staff session mode.

pub const ACADEMIC_PROFESSION: &str = "Academic staff";

pub const ACADEMIC_OBJECT_TYPES: &[&str] = &[
    "courses",
    "students",
    "lectures",
    "assignments",
    "research projects",
    "publications",
    "colleagues",
    "meetings",
    "departments",
    "emails",
    "exams",
    "grades",
    "syllabi",
    "conferences",
    "grant applications",
];

pub const ACADEMIC_ACTIVITIES: &[&str] = &[
    "read and respond to email",
    "schedule meetings",
    "attend meetings",
    "analyze research data",
    "develop data analysis scripts",
    "visualize research results",
    "write research papers",
    "edit manuscripts",
    "collaborate on papers in Overleaf",
    "review and revise manuscripts",
    "manage references and citations",
    "submit manuscripts to journals or conferences",
    "review peer submissions",
    "prepare conference presentations",
    "attend and present at conferences",
    "develop research grant applications",
    "collaborate with colleagues",
    "supervise students",
    "grade assignments",
    "organize and manage research files",
    "search scientific literature",
    "read research publications",
];

pub fn academic_object_types() -> Vec<String> {
    ACADEMIC_OBJECT_TYPES.iter().map(|s| s.to_string()).collect()
}

pub fn academic_activities() -> Vec<String> {
    ACADEMIC_ACTIVITIES.iter().map(|s| s.to_string()).collect()
}
