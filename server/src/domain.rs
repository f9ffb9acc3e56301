//! The reference deployment's two record types (spec §1, §8): `Discipline`
//! and `Course`. Each implements [`campus_search_core::Searchable`] so it
//! can be indexed by the generic fuzzy-search core; the direct by-code
//! lookup routes (`/api/disciplina/:code`, `/api/curso/:code[/:variant]`)
//! serialize these structs straight to JSON, independent of the search index.

use campus_search_core::ordered_set::OrderedSet;
use campus_search_core::schema::{PropertySpec, Searchable};
use serde::{Deserialize, Serialize};

/// One university discipline (course unit), e.g. `MC102`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub code: String,
    pub name: String,
    pub credits: u32,
    #[serde(rename = "reqBy")]
    pub req_by: OrderedSet<String>,
}

impl Searchable for Discipline {
    fn properties() -> &'static [PropertySpec<Self>] {
        &[
            PropertySpec {
                name: "code",
                get: |d| d.code.as_str(),
                weight: 3.0,
                is_identifier: true,
                is_hidden: false,
            },
            PropertySpec {
                name: "name",
                get: |d| d.name.as_str(),
                weight: 2.0,
                is_identifier: false,
                is_hidden: false,
            },
        ]
    }

    fn content_label() -> &'static str {
        "discipline"
    }
}

/// One semester's worth of required disciplines plus an elective-slot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Semester {
    pub disciplines: Vec<DisciplineRef>,
    pub electives: u32,
}

/// A discipline as referenced from a course tree: just enough to render a
/// curriculum grid without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplineRef {
    pub code: String,
    pub credits: u32,
}

/// One curriculum variant of a course (e.g. `AA`, `AB`, `AX`), as a sequence
/// of semesters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseVariant {
    pub code: String,
    pub semesters: Vec<Semester>,
}

/// A degree course, e.g. course `34`, with one or more curriculum variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub variants: Vec<CourseVariant>,
}

impl Course {
    /// Resolve `:variant` (spec §6: "string or index") against this course's
    /// variants: first by exact code match, falling back to a 0-based index
    /// into the variant list so `/api/curso/:code/:n` works without knowing
    /// variant codes ahead of time.
    pub fn find_variant(&self, raw: &str) -> Option<&CourseVariant> {
        if let Some(by_code) = self.variants.iter().find(|v| v.code == raw) {
            return Some(by_code);
        }
        let index: usize = raw.parse().ok()?;
        self.variants.get(index)
    }
}

impl Searchable for Course {
    fn properties() -> &'static [PropertySpec<Self>] {
        &[
            PropertySpec {
                name: "code",
                get: |c| c.code.as_str(),
                weight: 3.0,
                is_identifier: true,
                is_hidden: false,
            },
            PropertySpec {
                name: "name",
                get: |c| c.name.as_str(),
                weight: 2.0,
                is_identifier: false,
                is_hidden: false,
            },
        ]
    }

    fn content_label() -> &'static str {
        "course"
    }
}

/// Wire shape for `GET /api/curso/:code` (spec §6): the course's code plus
/// its known variant codes, deduplicated and sorted by [`OrderedSet`].
#[derive(Debug, Clone, Serialize)]
pub struct CoursePreview {
    pub code: String,
    pub name: String,
    pub variants: OrderedSet<String>,
}

impl From<&Course> for CoursePreview {
    fn from(course: &Course) -> Self {
        CoursePreview {
            code: course.code.clone(),
            name: course.name.clone(),
            variants: course.variants.iter().map(|v| v.code.clone()).collect(),
        }
    }
}

/// Wire shape for `GET /api/curso/:code/:variant` (spec §6).
#[derive(Debug, Clone, Serialize)]
pub struct CourseTree {
    pub code: String,
    pub variant: String,
    pub semesters: Vec<Semester>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> Course {
        Course {
            code: "34".into(),
            name: "Engenharia da Computacao".into(),
            variants: vec![
                CourseVariant { code: "AA".into(), semesters: vec![] },
                CourseVariant { code: "AB".into(), semesters: vec![] },
                CourseVariant {
                    code: "AX".into(),
                    semesters: vec![Semester {
                        disciplines: vec![DisciplineRef { code: "F 128".into(), credits: 4 }],
                        electives: 0,
                    }],
                },
            ],
        }
    }

    #[test]
    fn find_variant_by_code() {
        let course = sample_course();
        assert_eq!(course.find_variant("AB").unwrap().code, "AB");
    }

    #[test]
    fn find_variant_by_index() {
        let course = sample_course();
        let v = course.find_variant("2").unwrap();
        assert_eq!(v.code, "AX");
        assert_eq!(v.semesters[0].disciplines[0].code, "F 128");
    }

    #[test]
    fn find_variant_out_of_range_is_none() {
        let course = sample_course();
        assert!(course.find_variant("3").is_none());
    }

    #[test]
    fn course_preview_lists_variant_codes() {
        let course = sample_course();
        let preview = CoursePreview::from(&course);
        assert_eq!(preview.variants.as_slice(), &["AA".to_string(), "AB".to_string(), "AX".to_string()]);
    }

    #[test]
    fn discipline_json_uses_req_by_camel_case() {
        let d = Discipline {
            code: "MC102".into(),
            name: "Algoritmos e Programacao de Computadores".into(),
            credits: 6,
            req_by: ["MC202".to_string(), "MC322".to_string()].into_iter().collect(),
        };
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("reqBy").is_some());
        assert!(json.get("req_by").is_none());
    }
}
