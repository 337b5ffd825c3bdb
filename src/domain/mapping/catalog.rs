//! Closed lookup table of resource types that map to CDK constructs.

/// How one resource type is expressed in CDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub resource_type: &'static str,
    /// Service module suffix, appended to the configured module prefix.
    pub service: &'static str,
    pub class: &'static str,
    /// Dotted property paths holding free-form maps whose keys are emitted unchanged.
    pub verbatim: &'static [&'static str],
    /// Local import name when `class` clashes with another entry's class.
    pub alias: Option<&'static str>,
}

impl ResourceKind {
    /// The name the generated stack uses for the construct class.
    pub fn local_name(&self) -> &'static str {
        self.alias.unwrap_or(self.class)
    }
}

const POLICY: &[&str] = &["PolicyDocument"];
const NONE: &[&str] = &[];

const CATALOG: &[ResourceKind] = &[
    kind("AWS::AutoScaling::AutoScalingGroup", "autoscaling", "CfnAutoScalingGroup", NONE),
    kind("AWS::AutoScaling::LaunchConfiguration", "autoscaling", "CfnLaunchConfiguration", NONE),
    kind("AWS::AutoScaling::ScalingPolicy", "autoscaling", "CfnScalingPolicy", NONE),
    kind("AWS::CertificateManager::Certificate", "certificatemanager", "CfnCertificate", NONE),
    kind("AWS::CloudWatch::Alarm", "cloudwatch", "CfnAlarm", NONE),
    kind("AWS::DynamoDB::Table", "dynamodb", "CfnTable", NONE),
    kind("AWS::EC2::Instance", "ec2", "CfnInstance", NONE),
    kind("AWS::EC2::SecurityGroup", "ec2", "CfnSecurityGroup", NONE),
    kind("AWS::EC2::SecurityGroupEgress", "ec2", "CfnSecurityGroupEgress", NONE),
    kind("AWS::EC2::SecurityGroupIngress", "ec2", "CfnSecurityGroupIngress", NONE),
    kind("AWS::ElasticLoadBalancing::LoadBalancer", "elasticloadbalancing", "CfnLoadBalancer", NONE),
    kind("AWS::ElasticLoadBalancingV2::Listener", "elasticloadbalancingv2", "CfnListener", NONE),
    aliased(
        kind("AWS::ElasticLoadBalancingV2::LoadBalancer", "elasticloadbalancingv2", "CfnLoadBalancer", NONE),
        "CfnLoadBalancerV2",
    ),
    kind("AWS::ElasticLoadBalancingV2::TargetGroup", "elasticloadbalancingv2", "CfnTargetGroup", NONE),
    kind(
        "AWS::Events::Rule",
        "events",
        "CfnRule",
        &["EventPattern", "Targets.InputTransformer.InputPathsMap"],
    ),
    kind("AWS::IAM::InstanceProfile", "iam", "CfnInstanceProfile", NONE),
    kind("AWS::IAM::ManagedPolicy", "iam", "CfnManagedPolicy", POLICY),
    kind("AWS::IAM::Policy", "iam", "CfnPolicy", POLICY),
    kind("AWS::IAM::Role", "iam", "CfnRole", &["AssumeRolePolicyDocument", "PolicyDocument"]),
    kind("AWS::KMS::Key", "kms", "CfnKey", &["KeyPolicy"]),
    kind("AWS::Lambda::Function", "lambda", "CfnFunction", &["Environment.Variables"]),
    kind("AWS::Lambda::Permission", "lambda", "CfnPermission", NONE),
    kind("AWS::Logs::LogGroup", "logs", "CfnLogGroup", NONE),
    kind("AWS::Route53::RecordSet", "route53", "CfnRecordSet", NONE),
    kind("AWS::S3::Bucket", "s3", "CfnBucket", NONE),
    kind("AWS::S3::BucketPolicy", "s3", "CfnBucketPolicy", POLICY),
    kind(
        "AWS::SNS::Subscription",
        "sns",
        "CfnSubscription",
        &["FilterPolicy", "DeliveryPolicy", "RedrivePolicy"],
    ),
    kind("AWS::SNS::Topic", "sns", "CfnTopic", &["DeliveryPolicy", "DataProtectionPolicy"]),
    kind("AWS::SNS::TopicPolicy", "sns", "CfnTopicPolicy", POLICY),
    kind("AWS::SQS::Queue", "sqs", "CfnQueue", &["RedrivePolicy", "RedriveAllowPolicy"]),
    kind("AWS::SQS::QueuePolicy", "sqs", "CfnQueuePolicy", POLICY),
    kind("AWS::SSM::Parameter", "ssm", "CfnParameter", &["Tags"]),
];

const fn kind(
    resource_type: &'static str,
    service: &'static str,
    class: &'static str,
    verbatim: &'static [&'static str],
) -> ResourceKind {
    ResourceKind { resource_type, service, class, verbatim, alias: None }
}

const fn aliased(kind: ResourceKind, alias: &'static str) -> ResourceKind {
    ResourceKind { alias: Some(alias), ..kind }
}

/// The construct for `resource_type`, or `None` when the type is not supported.
pub fn lookup(resource_type: &str) -> Option<&'static ResourceKind> {
    CATALOG.iter().find(|kind| kind.resource_type == resource_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_type_resolves() {
        let kind = lookup("AWS::S3::Bucket").unwrap();
        assert_eq!(kind.service, "s3");
        assert_eq!(kind.class, "CfnBucket");
    }

    #[test]
    fn unknown_type_is_unsupported() {
        assert!(lookup("Unknown::Weird::Thing").is_none());
    }

    #[test]
    fn catalog_has_no_duplicate_types() {
        let unique: HashSet<_> = CATALOG.iter().map(|k| k.resource_type).collect();
        assert_eq!(unique.len(), CATALOG.len());
    }

    #[test]
    fn local_names_are_unique() {
        let unique: HashSet<_> = CATALOG.iter().map(ResourceKind::local_name).collect();
        assert_eq!(unique.len(), CATALOG.len());
    }

    #[test]
    fn load_balancer_generations_do_not_share_a_name() {
        let classic = lookup("AWS::ElasticLoadBalancing::LoadBalancer").unwrap();
        let v2 = lookup("AWS::ElasticLoadBalancingV2::LoadBalancer").unwrap();
        assert_eq!(classic.local_name(), "CfnLoadBalancer");
        assert_eq!(v2.class, "CfnLoadBalancer");
        assert_eq!(v2.local_name(), "CfnLoadBalancerV2");
    }

    #[test]
    fn class_names_follow_l1_convention() {
        for kind in CATALOG {
            let suffix = kind.resource_type.rsplit("::").next().unwrap();
            assert_eq!(kind.class, format!("Cfn{suffix}"), "{}", kind.resource_type);
        }
    }
}
