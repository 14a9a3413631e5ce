//! Prompt templates for the bot commands.
//!
//! Every function here is pure: identical input gives a byte-identical prompt.

/// Rubric appended after the website subject.
const WEBSITE_RUBRIC: &str = "\
**Here's what I'm looking for:**

* **Purpose:** What is the main function or service offered by the website? Is it an e-commerce store, a news website, a portfolio, a blog, etc.?
* **Content:** Briefly describe the type of content found on the website (e.g., articles, products, services, images, videos).
* **Target Audience:** Who is the website aimed at? (e.g., businesses, general consumers, a specific niche)

**Pay close attention to the website's metadata, including the title tag, meta description, and keywords.** This information can provide valuable clues about the website's purpose and target audience.

**Keep the response concise and informative.**";

/// Output structure the vision description is reformatted into.
const REFORMAT_RUBRIC: &str = "\
Please reformat this response into a clear and concise summary with the following structure:

**Image:**

* Briefly describe the main subject(s) in the image.

**Details:**

* Describe any interesting details or objects in the image.

**Additional Notes:**

* Include any relevant information not covered in the previous sections.";

/// Prompt asking the text model to analyse a website or free-text subject.
///
/// # Examples
///
/// ```
/// use inclusive_brief_core::prompt::website_analysis_prompt;
/// let prompt = website_analysis_prompt("example.com blog");
/// assert!(prompt.starts_with("Analyze the website: example.com blog\n"));
/// ```
#[must_use]
pub fn website_analysis_prompt(subject: &str) -> String {
    format!("Analyze the website: {subject}\n\n{WEBSITE_RUBRIC}")
}

/// Prompt asking the text model to restructure a raw vision description
/// into the Image / Details / Additional Notes sections.
#[must_use]
pub fn vision_reformat_prompt(raw_description: &str) -> String {
    format!(
        "The following text is the response from a vision model analyzing an image:\n\n\
         {raw_description}\n\n\
         {REFORMAT_RUBRIC}"
    )
}
