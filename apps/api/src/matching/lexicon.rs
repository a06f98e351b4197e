//! Skill lexicon: the fixed mapping of category to canonical skill terms
//! that drives all extraction. Loaded once at process start and never
//! mutated; callers receive it by reference.

use once_cell::sync::Lazy;

use crate::models::skills::SkillCategory;

/// Terms whose presence in a resume hints at seniority. Two or more hits
/// add one point to every per-category score.
pub const SENIORITY_HINTS: &[&str] = &[
    "lead",
    "principal",
    "architect",
    "manager",
    "staff",
    "senior",
    "tech lead",
    "ownership",
    "mentored",
];

/// Category terms in declaration order. `other` carries no terms; it
/// exists so extracted skill sets cover the full category space.
const SKILL_GROUPS: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Languages,
        &[
            "python",
            "java",
            "c#",
            "csharp",
            ".net",
            "dotnet",
            "javascript",
            "typescript",
            "sql",
            "go",
            "rust",
            "kotlin",
            "swift",
            "php",
            "ruby",
        ],
    ),
    (
        SkillCategory::Frontend,
        &[
            "react",
            "angular",
            "vue",
            "next.js",
            "nextjs",
            "node.js",
            "nodejs",
            "html",
            "css",
            "tailwind",
            "webpack",
            "vite",
        ],
    ),
    (
        SkillCategory::Backend,
        &[
            "fastapi",
            "flask",
            "django",
            "asp.net",
            "aspnet",
            "spring",
            "spring boot",
            "express",
            "nestjs",
            "grpc",
            "rest",
            "graphql",
            "web api",
            "api",
        ],
    ),
    (
        SkillCategory::CloudDevops,
        &[
            "aws",
            "azure",
            "gcp",
            "kubernetes",
            "k8s",
            "docker",
            "terraform",
            "helm",
            "ci/cd",
            "github actions",
            "azure devops",
            "gitlab ci",
            "jenkins",
        ],
    ),
    (
        SkillCategory::Data,
        &[
            "postgres",
            "postgresql",
            "mysql",
            "sql server",
            "oracle",
            "mongodb",
            "redis",
            "elasticsearch",
            "kafka",
            "spark",
            "databricks",
        ],
    ),
    (
        SkillCategory::Testing,
        &[
            "pytest",
            "jest",
            "cypress",
            "selenium",
            "playwright",
            "tdd",
            "unit testing",
            "integration testing",
        ],
    ),
    (
        SkillCategory::Security,
        &["oauth", "oidc", "jwt", "sso", "iam", "encryption", "owasp"],
    ),
    (SkillCategory::Other, &[]),
];

/// Immutable category-to-terms mapping, preserving declaration order.
pub struct SkillLexicon {
    groups: &'static [(SkillCategory, &'static [&'static str])],
}

static BUILTIN: Lazy<SkillLexicon> = Lazy::new(|| SkillLexicon {
    groups: SKILL_GROUPS,
});

impl SkillLexicon {
    /// The process-wide lexicon instance.
    pub fn builtin() -> &'static SkillLexicon {
        &BUILTIN
    }

    pub fn groups(&self) -> impl Iterator<Item = (SkillCategory, &'static [&'static str])> + '_ {
        self.groups.iter().copied()
    }

    pub fn terms(&self, category: SkillCategory) -> &'static [&'static str] {
        self.groups
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, terms)| *terms)
            .unwrap_or_default()
    }
}
