//! Fixed system prompts for the per-file and reduction calls, plus the user
//! prompt builders that frame a file's path and content for the service.

use crate::category::Category;

/// Classify one file into exactly one category label.
pub(crate) const CATEGORIZE_SYSTEM: &str = r#"You classify one source file into exactly one of these categories:

- API: REST controllers, routes, request handlers
- Data Model: Entity classes, value objects, enums
- Business Logic: Core services, domain logic, use case implementations
- Persistence: Repositories, DAOs, database interaction code
- Configuration: Framework configuration and setup classes
- Security: Authentication, authorization, filters, tokens
- Testing: Unit tests, integration tests, mocks, test helpers
- Utilities: Common helper methods, constants, exceptions
- Documentation: Markdown, AsciiDoc, comments, usage guides
- Other: Everything else

Respond with ONLY the category name, nothing else."#;

/// Documentation fragment for API / Data Model / Business Logic files:
/// public surface only, no implementation detail.
pub(crate) const SHORT_DOC_PUBLIC_SURFACE_SYSTEM: &str = r#"You are a documentation expert. Given a file and its category, generate a Markdown section documenting the file.

Guidelines:
- Focus only on public-facing parts (method names, class signatures, config sections).
- DO NOT INCLUDE CODE IMPLEMENTATION.
- Be structured and schematic: one heading per public element, a signature line, a short description, then its parameters and return value.
- Write only Markdown output."#;

/// Documentation fragment for every other category: short and schematic.
pub(crate) const SHORT_DOC_BRIEF_SYSTEM: &str = r#"You are a documentation expert. Given a file and its category, generate a short Markdown section summarizing the file.

Guidelines:
- Focus only on public-facing parts (method names, class signatures, config sections); DO NOT INCLUDE CODE IMPLEMENTATION.
- Keep it short and clear.
- Be structured and schematic.
- Write only Markdown output."#;

/// Merge all per-file documentation fragments into one document.
pub(crate) const COMBINE_DOCS_SYSTEM: &str = r#"Given a list of small documentation snippets of a project, combine them into a single big documentation file.

Guidelines:
- Write only Markdown output.
- Be structured and schematic.
- Preserve all technical detail; add nothing, omit nothing."#;

/// Reorganize an already-combined documentation file for readability.
pub(crate) const CLEAN_UP_DOCS_SYSTEM: &str = r#"Given a Markdown document that serves as a project's documentation, re-organize its content to improve the overall structure, sectioning, and flow.
Your goal is to make the document more logically organized, readable, and suitable for publication.

- Write only Markdown output.
- Do not remove any information."#;

/// Mermaid diagram for one file.
pub(crate) const FILE_DIAGRAM_SYSTEM: &str = r#"You are a code analysis expert. Analyze the provided code file and generate a Mermaid diagram that shows:
1. The main components/classes/functions
2. Their relationships and dependencies
3. Data flow between components

Use appropriate Mermaid diagram types:
- classDiagram for object-oriented code
- flowchart for procedural code
- sequenceDiagram for showing interactions

Format the output as a valid Mermaid diagram with clear, concise labels.
Focus on the most important relationships and avoid cluttering the diagram.

Return Mermaid code only."#;

/// Merge all per-file diagrams into one system diagram.
pub(crate) const COMBINE_DIAGRAMS_SYSTEM: &str = r#"You are a system architecture expert. Create a comprehensive system diagram by combining the provided individual file diagrams.

Guidelines:
- Use a hierarchical structure to show system organization
- Maintain clear relationships between components
- Use appropriate Mermaid diagram types
- Include a legend if needed
- Keep the diagram clean and readable
- Focus on the most important system-wide relationships

Return Mermaid code only."#;

/// Prune a combined system diagram down to its essential structure.
pub(crate) const SIMPLIFY_DIAGRAM_SYSTEM: &str = r#"You are a system architecture expert. Simplify the provided Mermaid diagram by:
1. Keeping only the most critical components and relationships
2. Removing redundant or less important connections
3. Simplifying complex hierarchies while maintaining the core architecture
4. Using clear, concise labels
5. Ensuring the diagram remains valid Mermaid syntax

Focus on making the diagram more readable while preserving the essential system structure.
Return Mermaid code only."#;

/// Modernization suggestions for one file, given whole-project documentation
/// as context.
pub(crate) const MODERNIZATION_SYSTEM: &str = r#"You are a Java modernization expert. Analyze the provided Java file and suggest specific modernization opportunities for Spring Boot migration.

For each suggestion, provide:
1. Current Pattern: What's being used now
2. Modern Alternative: What to use in Spring Boot
3. Migration Steps: Step-by-step guide
4. Benefits: Why this change is beneficial
5. Potential Challenges: What to watch out for

Format the output in Markdown with clear sections and code examples where relevant.
Focus on:
- Dependency Injection patterns
- Configuration management
- REST API implementations
- Database access patterns
- Security implementations
- Testing approaches"#;

/// Merge all per-file modernization analyses into one report.
pub(crate) const MODERNIZATION_REPORT_SYSTEM: &str = r#"You are a technical documentation expert. Create a comprehensive modernization report from the provided analyses.

Guidelines:
- Organize suggestions by category (e.g., DI, Security, Testing)
- Prioritize changes based on impact and complexity
- Include a migration roadmap
- Add a summary of benefits and risks
- Format in clear Markdown with proper sections"#;

/// Frames a single file for a per-file call.
pub(crate) fn file_user_prompt(path: &str, content: &str) -> String {
    format!("File path: {path}\n\nContent:\n{content}")
}

/// Frames a single file plus its category for the short-doc call.
pub(crate) fn categorized_file_user_prompt(
    path: &str,
    category: Category,
    content: &str,
) -> String {
    format!("File path: {path}\nCategory: {category}\n\nContent:\n{content}")
}

/// Frames a single file plus the project documentation for the modernization
/// call.
pub(crate) fn modernization_user_prompt(project_doc: &str, path: &str, content: &str) -> String {
    format!("Documentation of the project:\n{project_doc}\n\nFile path: {path}\n\nContent:\n{content}")
}
