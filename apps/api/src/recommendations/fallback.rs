use crate::recommendations::models::{Course, Job, RecommendationSet};

/// Built-in recommendations served when the provider fails or returns something unusable.
/// Always fully populated.
pub fn fallback_set() -> RecommendationSet {
    RecommendationSet {
        courses: vec![
            course(
                "Full Stack Web Development",
                "Coursera",
                "https://coursera.org",
                "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=800",
                "React, Python, Tailwind",
            ),
            course(
                "Mastering Robotics with ROS2",
                "Udemy",
                "https://udemy.com",
                "https://images.unsplash.com/photo-1531746790731-6c087fecd05a?w=800",
                "ROS2, Robotics, Gazebo",
            ),
            course(
                "AI & Machine Learning Foundations",
                "edX",
                "https://edx.org",
                "https://images.unsplash.com/photo-1555255707-c07966088b7b?w=800",
                "AI, ML, Python",
            ),
        ],
        jobs: vec![
            job(
                "Junior Robotics Engineer",
                "Robotix Core",
                "Bangalore",
                "Help us build the next generation of warehouse robots. Experience with ROS2 is a plus.",
                "Python, ROS2, C++",
            ),
            job(
                "Software Engineer Intern",
                "Innovate AI",
                "Remote",
                "Contribute to cutting-edge AI projects in a fast-paced startup environment.",
                "Python, React, Fast API",
            ),
            job(
                "Embedded Systems Intern",
                "TechCircuit",
                "Chennai",
                "Design and test PCB layouts for IoT devices.",
                "PCB Design, Embedded C, Altium",
            ),
        ],
    }
}

fn course(title: &str, platform: &str, link: &str, banner_url: &str, tags: &str) -> Course {
    Course {
        title: title.to_string(),
        platform: platform.to_string(),
        link: link.to_string(),
        banner_url: banner_url.to_string(),
        tags: tags.to_string(),
    }
}

fn job(title: &str, company: &str, location: &str, description: &str, skills: &str) -> Job {
    Job {
        title: title.to_string(),
        company: company.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        required_skills: skills.to_string(),
        link: "#".to_string(),
    }
}
