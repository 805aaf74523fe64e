//! Instruction text sent to the suggestion service for each stage.

use serde::Serialize;

use super::{OracleMessage, SuggestionRequest};

const OBJECT_TYPES_SYSTEM: &str = r#"You identify high-level object types for object-centric event logs.
Object types are general categories of entities, human or non-human, that show up in a person's work.

Task:
1. Consider the profession and the entities its work usually involves.
2. List object types that could plausibly appear in that work.
3. Name categories of entities only, never specific instances or activities.

Rules:
- Lowercase strings only, no commentary.
- Cover a broad but relevant range; every type must be distinct.

Answer with a JSON array of lowercase strings, for example for the profession "recruiter":
["applicants", "applications", "managers", "offers", "vacancies"]"#;

const ACTIVITIES_SYSTEM: &str = r#"You identify high-level work activities for process mining.
Activities are meaningful steps a person performs, usually acting on one or more object types.

Task:
1. Consider the profession and the activities its work usually involves.
2. For each object type, think of activities that create, use, change or support it.
3. List core and supporting activities recognisable in the domain.

Rules:
- Lowercase strings only, no commentary or extra formatting.

Answer with a JSON array of lowercase strings, for example for the profession "recruiter" with
object types ["applicants", "applications", "job offers", "managers"]:
["review applications", "screen applicants", "schedule interviews", "coordinate with managers", "send job offers"]"#;

const OBJECTS_SYSTEM: &str = r#"You extract object instances from window titles for object-centric process mining.

Task:
1. Read the window titles in the light of the profession, object types and activities.
2. Find specific objects (for example "project alpha", "thesis john doe") named or implied by the titles.
3. Assign each object the best matching type from the given object types.

Rules:
- No duplicate objects.
- An object's name must differ from its object type.
- For person types (student, colleague, ...) use a plausible name as the object.
- Watch for abbreviations, concatenations and project or document references.

Answer with a JSON array of records:
[{"object": "project alpha", "object_type": "research project"}, {"object": "john doe", "object_type": "colleague"}]"#;

const ENRICHMENT_SYSTEM: &str = r#"You associate window titles with the objects and activities of a professional workflow.
Only infer associations that the title clearly supports."#;

const ENRICHMENT_TASK: &str = r#"For each window title below, decide whether it clearly relates to one or more of the given
activities and one or more of the given objects. If it does, return the title with those activities
and objects. Otherwise return the title with empty lists.

Rules:
- Ground the associations in the profession.
- Include an object or activity only when the title directly and unambiguously implies it.
- Do not guess on vague titles.

Answer with a JSON array of records:
[{"title": "some title text", "activities": ["activity A"], "objects": ["object X"]}]"#;

/// Render the system and user messages for one suggestion request.
pub fn render(request: &SuggestionRequest) -> Vec<OracleMessage> {
    match request {
        SuggestionRequest::ObjectTypes { profession } => vec![
            OracleMessage::system(OBJECT_TYPES_SYSTEM),
            OracleMessage::user(format!("Profession: \"{profession}\"")),
        ],
        SuggestionRequest::Activities {
            profession,
            object_types,
        } => vec![
            OracleMessage::system(ACTIVITIES_SYSTEM),
            OracleMessage::user(format!(
                "Profession: {profession}\nObject Types: {}",
                json(object_types)
            )),
        ],
        SuggestionRequest::Objects {
            profession,
            object_types,
            activities,
            titles,
        } => vec![
            OracleMessage::system(OBJECTS_SYSTEM),
            OracleMessage::user(format!(
                "Profession: {profession}\nObject Types: {}\nActivities: {}\nWindow Titles: {}",
                json(object_types),
                json(activities),
                json(titles)
            )),
        ],
        SuggestionRequest::Enrichment {
            profession,
            objects,
            activities,
            titles,
        } => vec![
            OracleMessage::system(ENRICHMENT_SYSTEM),
            OracleMessage::user(format!(
                "{ENRICHMENT_TASK}\n\nProfession: {profession}\nObjects and Types: {}\nActivities: {}\nTitles: {}",
                json(objects),
                json(activities),
                json(titles)
            )),
        ],
    }
}

fn json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}
